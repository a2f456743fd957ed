//! Option Resolver - raw arguments into a single `Options` value
//!
//! Flags follow the single-dash convention: `-h`, `-cid`, `-i`, `-o`, `-t`.
//! Double-dash spellings are accepted too. Flag scanning stops at the first
//! non-flag argument or `--`; everything after it is ignored. Parsing never
//! exits the process; syntax errors come back as [`ParseError`].

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::debug;
use serde::Serialize;
use std::ffi::OsString;
use thiserror::Error;

use crate::validation::{ValidationError, Validator};

/// Separator between the top and bottom banner in `-t`
pub const TEXT_SEPARATOR: char = '|';

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] clap::Error),

    #[error("flag provided but not defined: {0}")]
    UnknownFlag(String),

    #[error("bad flag syntax: {0}")]
    BadFlagSyntax(String),

    #[error("invalid boolean value {value:?} for -{flag}")]
    InvalidBoolean { flag: String, value: String },
}

impl ParseError {
    /// Print the diagnostic and terminate with the parser's exit status.
    pub fn exit(&self) -> ! {
        let kind = match self {
            Self::Syntax(err) => err.exit(),
            Self::UnknownFlag(_) | Self::BadFlagSyntax(_) => ErrorKind::UnknownArgument,
            Self::InvalidBoolean { .. } => ErrorKind::InvalidValue,
        };
        Flags::command().error(kind, self).exit()
    }
}

/// Raw flag surface, as the argument parser sees it
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "meme")]
#[command(about = "Command line meme generator")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(override_usage = "meme [OPTIONS]")]
#[command(args_override_self = true)]
pub struct Flags {
    /// Show help.
    #[arg(short = 'h')]
    pub help: bool,

    /// The client id of an application registered with imgur.com. If specified, the new meme
    /// will be uploaded to imgur.com instead of being saved locally.
    #[arg(long = "cid", value_name = "CLIENT_ID", default_value = "", hide_default_value = true, allow_hyphen_values = true)]
    pub client_id: String,

    /// One of the built-in templates, a URL or the path to a local file (gif, jpeg or png.)
    /// You can also use '-' to read an image from stdin.
    #[arg(short = 'i', value_name = "IMAGE", default_value = "", hide_default_value = true, allow_hyphen_values = true)]
    pub image: String,

    /// The optional name of the output file (png). If omitted, a temporary file will be used.
    #[arg(short = 'o', value_name = "NAME", default_value = "", hide_default_value = true, allow_hyphen_values = true)]
    pub name: String,

    /// The meme text. Separate the top and bottom banners using a pipe character.
    #[arg(short = 't', value_name = "TEXT", default_value = "", hide_default_value = true, allow_hyphen_values = true)]
    pub text: String,

    /// Arguments after flag scanning stopped; ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<OsString>,
}

/// Flag names and whether each takes a value
const FLAGS: &[(&str, bool)] = &[
    ("h", false),
    ("cid", true),
    ("i", true),
    ("o", true),
    ("t", true),
];

/// Where the finished meme goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    /// Upload to the image host using this client id
    Upload { client_id: String },
    /// Save locally; `None` lets the saver pick a temporary file
    File { name: Option<String> },
}

/// Resolved configuration, built once per invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Options {
    pub help: bool,
    pub client_id: Option<String>,
    /// Template id, URL, local path, or `-` for stdin
    pub image: String,
    pub name: Option<String>,
    pub top: String,
    pub bottom: String,
}

impl Options {
    pub fn from_flags(flags: Flags) -> Self {
        let (top, bottom) = split_text(&flags.text);
        Self {
            help: flags.help,
            client_id: non_empty(flags.client_id),
            image: flags.image,
            name: non_empty(flags.name),
            top,
            bottom,
        }
    }

    /// Check the preconditions for image synthesis, returning the first failure.
    pub fn valid(&self) -> Result<(), ValidationError> {
        Validator::new().validate(self).into_result()
    }

    pub fn destination(&self) -> Destination {
        match &self.client_id {
            Some(client_id) => Destination::Upload {
                client_id: client_id.clone(),
            },
            None => Destination::File {
                name: self.name.clone(),
            },
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Split banner text into top and bottom.
///
/// Without a separator everything is the top banner. Anything after a
/// second separator is dropped.
pub fn split_text(raw: &str) -> (String, String) {
    let mut parts = raw.split(TEXT_SEPARATOR);
    let top = parts.next().unwrap_or_default().to_string();
    let bottom = parts.next().unwrap_or_default().to_string();
    (top, bottom)
}

/// Parse the full argument vector (program name first) into `Options`.
pub fn parse_options<I, T>(args: I) -> Result<Options, ParseError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let scanned = normalize_args(args.into_iter().map(Into::into).collect())?;
    let mut flags = Flags::try_parse_from(scanned.args)?;
    flags.help = scanned.help.unwrap_or(false);

    if !flags.rest.is_empty() {
        debug!("ignoring {} trailing arguments", flags.rest.len());
    }

    let options = Options::from_flags(flags);
    debug!("resolved options: {:?}", options);
    Ok(options)
}

/// Arguments rewritten for clap, plus the resolved `-h` value
struct Scanned {
    args: Vec<OsString>,
    help: Option<bool>,
}

/// Rewrite flag spellings into the form clap expects: one dash for
/// single-letter flags, two for longer ones. Values are left untouched.
///
/// Scanning stops at the first non-flag argument (or `--`); the rest is
/// passed behind a `--` so clap never reads it as flags. `-h` is resolved
/// here because it accepts an optional `=<bool>`.
fn normalize_args(args: Vec<OsString>) -> Result<Scanned, ParseError> {
    let mut normalized = Vec::with_capacity(args.len() + 1);
    let mut help = None;
    let mut args = args.into_iter();

    if let Some(program) = args.next() {
        normalized.push(program);
    }

    while let Some(arg) = args.next() {
        let text = arg.to_string_lossy().into_owned();

        if text == "--" || !is_flag(&text) {
            normalized.push(OsString::from("--"));
            if text != "--" {
                normalized.push(arg);
            }
            normalized.extend(args.by_ref());
            break;
        }

        match scan_flag(&text)? {
            ScannedFlag::Help(value) => help = Some(value),
            ScannedFlag::Value { flag, inline } => {
                let value = inline.map(OsString::from).or_else(|| args.next());
                match value {
                    // clap would take a bare `--` as the terminator
                    Some(value) if value == "--" => normalized.push(format!("{}=--", flag).into()),
                    Some(value) => {
                        normalized.push(flag.into());
                        normalized.push(value);
                    }
                    None => normalized.push(flag.into()),
                }
            }
        }
    }

    Ok(Scanned {
        args: normalized,
        help,
    })
}

fn is_flag(arg: &str) -> bool {
    arg.len() >= 2 && arg.starts_with('-')
}

enum ScannedFlag {
    Help(bool),
    Value { flag: String, inline: Option<String> },
}

fn scan_flag(arg: &str) -> Result<ScannedFlag, ParseError> {
    let body = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))
        .unwrap_or(arg);

    if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
        return Err(ParseError::BadFlagSyntax(arg.to_string()));
    }

    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let &(name, takes_value) = FLAGS
        .iter()
        .find(|(flag, _)| *flag == name)
        .ok_or_else(|| ParseError::UnknownFlag(arg.to_string()))?;

    if !takes_value {
        return match inline {
            None => Ok(ScannedFlag::Help(true)),
            Some(value) => parse_bool(value)
                .map(ScannedFlag::Help)
                .ok_or_else(|| ParseError::InvalidBoolean {
                    flag: name.to_string(),
                    value: value.to_string(),
                }),
        };
    }

    let dashes = if name.len() == 1 { "-" } else { "--" };

    Ok(ScannedFlag::Value {
        flag: format!("{}{}", dashes, name),
        inline: inline.map(str::to_string),
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        let mut argv = vec!["meme"];
        argv.extend_from_slice(args);
        parse_options(argv).unwrap()
    }

    #[test]
    fn test_split_text() {
        assert_eq!(split_text("|khaaaan"), ("".into(), "khaaaan".into()));
        assert_eq!(
            split_text("Brace yourselves|The memes are coming!"),
            ("Brace yourselves".into(), "The memes are coming!".into())
        );
        assert_eq!(split_text("Hello"), ("Hello".into(), "".into()));
        assert_eq!(split_text(""), ("".into(), "".into()));
        assert_eq!(split_text("top|"), ("top".into(), "".into()));
    }

    #[test]
    fn test_split_text_drops_extra_segments() {
        assert_eq!(split_text("a|b|c"), ("a".into(), "b".into()));
        assert_eq!(split_text("||c"), ("".into(), "".into()));
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]);
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_all_flags() {
        let options = parse(&["-h", "-cid", "abc123", "-i", "kirk-khan", "-o", "out.png", "-t", "top|bottom"]);
        assert!(options.help);
        assert_eq!(options.client_id.as_deref(), Some("abc123"));
        assert_eq!(options.image, "kirk-khan");
        assert_eq!(options.name.as_deref(), Some("out.png"));
        assert_eq!(options.top, "top");
        assert_eq!(options.bottom, "bottom");
    }

    #[test]
    fn test_flag_spellings() {
        let options = parse(&["--cid=abc", "--i", "y-u-no", "-o=meme.png", "--t=hi"]);
        assert_eq!(options.client_id.as_deref(), Some("abc"));
        assert_eq!(options.image, "y-u-no");
        assert_eq!(options.name.as_deref(), Some("meme.png"));
        assert_eq!(options.top, "hi");
    }

    #[test]
    fn test_hyphen_values() {
        let options = parse(&["-i", "-", "-t", "-cid"]);
        assert_eq!(options.image, "-");
        assert_eq!(options.top, "-cid");
        assert_eq!(options.client_id, None);
    }

    #[test]
    fn test_last_flag_wins() {
        let options = parse(&["-i", "first", "-i", "second"]);
        assert_eq!(options.image, "second");
    }

    #[test]
    fn test_empty_values_are_absent() {
        let options = parse(&["-cid", "", "-o", ""]);
        assert_eq!(options.client_id, None);
        assert_eq!(options.name, None);
    }

    #[test]
    fn test_unknown_flag_is_error() {
        let err = parse_options(["meme", "-x"]).unwrap_err();
        assert!(matches!(err, ParseError::UnknownFlag(ref f) if f == "-x"));
        assert!(matches!(parse_options(["meme", "-cid"]), Err(ParseError::Syntax(_))));
    }

    #[test]
    fn test_attached_values_are_not_flags() {
        for arg in ["-image=kirk-khan", "-ikirk-khan", "-ofoo.png", "-tHi", "--image", "-help"] {
            let err = parse_options(["meme", arg, "-t", "hi"]).unwrap_err();
            assert!(
                matches!(err, ParseError::UnknownFlag(ref f) if f == arg),
                "{} should be rejected",
                arg
            );
        }
    }

    #[test]
    fn test_bad_flag_syntax() {
        for arg in ["---i", "-=x", "--=x"] {
            assert!(matches!(
                parse_options(["meme", arg]),
                Err(ParseError::BadFlagSyntax(_))
            ));
        }
    }

    #[test]
    fn test_help_takes_optional_bool() {
        assert!(parse(&["-h"]).help);
        assert!(parse(&["-h=true"]).help);
        assert!(parse(&["--h=1"]).help);
        assert!(!parse(&["-h=false", "-i", "x", "-t", "hi"]).help);
        assert!(!parse(&["-h", "-h=F"]).help);

        let err = parse_options(["meme", "-h=maybe"]).unwrap_err();
        assert!(matches!(err, ParseError::InvalidBoolean { ref value, .. } if value == "maybe"));
    }

    #[test]
    fn test_scanning_stops_at_first_positional() {
        let options = parse(&["-i", "x", "-t", "hi", "extra"]);
        assert_eq!(options.image, "x");
        assert_eq!(options.top, "hi");

        // Flags after the first positional are ignored, not parsed
        let options = parse(&["-i", "x", "stray", "-t", "hi", "-bogus"]);
        assert_eq!(options.image, "x");
        assert_eq!(options.top, "");

        let options = parse(&["-i", "x", "--", "-t", "hi"]);
        assert_eq!(options.top, "");
    }

    #[test]
    fn test_double_dash_as_value() {
        let options = parse(&["-t", "--", "-i", "x"]);
        assert_eq!(options.top, "--");
        assert_eq!(options.image, "x");
    }

    #[test]
    fn test_destination() {
        let upload = parse(&["-cid", "abc", "-o", "x.png"]);
        assert_eq!(upload.destination(), Destination::Upload { client_id: "abc".into() });

        let named = parse(&["-o", "x.png"]);
        assert_eq!(named.destination(), Destination::File { name: Some("x.png".into()) });

        assert_eq!(parse(&[]).destination(), Destination::File { name: None });
    }

    #[test]
    fn test_normalize_leaves_values_alone() {
        let args: Vec<OsString> = ["meme", "-t", "--cid", "-cid", "x", "-h=0", "rest", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        let scanned = normalize_args(args).unwrap();
        assert_eq!(
            scanned.args,
            vec!["meme", "-t", "--cid", "--cid", "x", "--", "rest", "-i"]
        );
        assert_eq!(scanned.help, Some(false));
    }
}
