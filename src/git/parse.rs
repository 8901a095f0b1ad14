//! git::parse
//!
//! Parsers for the plain-text output of git plumbing commands.
//!
//! Each parser takes the complete stdout of one command and returns the
//! structured value [`crate::git::TextStore`] hands to the resolver. Malformed
//! lines are errors, never silently skipped, so a truncated listing cannot
//! turn into a wrong answer.

use chrono::{DateTime, FixedOffset, TimeZone};

use super::store::{CommitHeader, EntryType, GitError, RefListing, Signature, TreeEntry};
use crate::core::types::{Oid, RefName};

fn parse_error(command: &str, message: impl Into<String>) -> GitError {
    GitError::Parse {
        command: command.to_string(),
        message: message.into(),
    }
}

/// Parse `git ls-tree [-z] <tree-ish>` output.
///
/// Each record is `<mode> SP <type> SP <sha> TAB <name>`. Records are
/// NUL-terminated with `-z` and newline-terminated otherwise; NUL wins when
/// present since names may then contain newlines.
pub fn parse_ls_tree(output: &str) -> Result<Vec<TreeEntry>, GitError> {
    const COMMAND: &str = "ls-tree";

    let records: Vec<&str> = if output.contains('\0') {
        output.split('\0').collect()
    } else {
        output.lines().collect()
    };

    let mut entries = Vec::new();
    for record in records.into_iter().filter(|r| !r.is_empty()) {
        let (meta, name) = record
            .split_once('\t')
            .ok_or_else(|| parse_error(COMMAND, format!("missing tab in '{record}'")))?;

        let mut fields = meta.split(' ');
        let (Some(mode), Some(kind), Some(sha), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(parse_error(
                COMMAND,
                format!("expected '<mode> <type> <sha>', got '{meta}'"),
            ));
        };

        let entry_type = match kind {
            "tree" => EntryType::Tree,
            "blob" => EntryType::Blob,
            "commit" => EntryType::Commit,
            other => return Err(parse_error(COMMAND, format!("unknown entry type '{other}'"))),
        };

        entries.push(TreeEntry {
            mode: mode.to_string(),
            entry_type,
            sha: Oid::new(sha)?,
            name: name.to_string(),
        });
    }

    log::trace!("parsed {} ls-tree entries", entries.len());
    Ok(entries)
}

/// Parse the header of `git cat-file commit <commit-ish>` output.
///
/// Reads up to the first blank line. Unknown header fields (`encoding`,
/// `gpgsig` and its continuation lines, `mergetag`) are ignored.
pub fn parse_commit_header(output: &str) -> Result<CommitHeader, GitError> {
    const COMMAND: &str = "cat-file commit";

    let mut tree = None;
    let mut parents = Vec::new();
    let mut author = None;
    let mut committer = None;

    for line in output.lines() {
        if line.is_empty() {
            break;
        }
        let Some((key, value)) = line.split_once(' ') else {
            continue;
        };
        match key {
            "tree" => tree = Some(Oid::new(value)?),
            "parent" => parents.push(Oid::new(value)?),
            "author" => author = Some(parse_signature(value)?),
            "committer" => committer = Some(parse_signature(value)?),
            _ => {}
        }
    }

    let tree = tree.ok_or_else(|| parse_error(COMMAND, "commit has no tree line"))?;
    let author = author.ok_or_else(|| parse_error(COMMAND, "commit has no author line"))?;

    Ok(CommitHeader {
        tree,
        parents,
        author,
        committer,
    })
}

/// Parse a signature value: `Name <email> <unix-seconds> <+hhmm>`.
pub fn parse_signature(value: &str) -> Result<Signature, GitError> {
    const COMMAND: &str = "cat-file commit";

    let (ident, when) = value
        .rsplit_once('>')
        .ok_or_else(|| parse_error(COMMAND, format!("signature without email: '{value}'")))?;
    let (name, email) = ident
        .split_once('<')
        .ok_or_else(|| parse_error(COMMAND, format!("signature without email: '{value}'")))?;

    let mut when = when.split_whitespace();
    let (Some(seconds), Some(offset)) = (when.next(), when.next()) else {
        return Err(parse_error(
            COMMAND,
            format!("signature without timestamp: '{value}'"),
        ));
    };

    let seconds: i64 = seconds
        .parse()
        .map_err(|_| parse_error(COMMAND, format!("bad timestamp '{seconds}'")))?;

    Ok(Signature {
        name: name.trim().to_string(),
        email: email.to_string(),
        time: signature_time(seconds, parse_offset_minutes(offset)?)
            .ok_or_else(|| parse_error(COMMAND, format!("timestamp out of range: {seconds}")))?,
    })
}

/// Parse a `+hhmm` / `-hhmm` timezone offset into minutes east of UTC.
fn parse_offset_minutes(offset: &str) -> Result<i32, GitError> {
    let bad = || parse_error("cat-file commit", format!("bad timezone '{offset}'"));

    let (sign, digits) = if let Some(digits) = offset.strip_prefix('+') {
        (1, digits)
    } else if let Some(digits) = offset.strip_prefix('-') {
        (-1, digits)
    } else {
        return Err(bad());
    };
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| bad())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| bad())?;

    Ok(sign * (hours * 60 + minutes))
}

/// Build a timestamp from unix seconds and an offset in minutes.
pub(crate) fn signature_time(seconds: i64, offset_minutes: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset_minutes * 60)?;
    offset.timestamp_opt(seconds, 0).single()
}

/// Parse `git show-ref <pattern>` output: `<sha> SP <refname>` per line.
pub fn parse_show_ref(output: &str) -> Result<Vec<RefListing>, GitError> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (sha, name) = line
                .split_once(' ')
                .ok_or_else(|| parse_error("show-ref", format!("expected '<sha> <ref>', got '{line}'")))?;
            Ok(RefListing {
                oid: Oid::new(sha)?,
                name: RefName::new(name.trim()).map_err(|e| parse_error("show-ref", e.to_string()))?,
            })
        })
        .collect()
}

/// Parse `git remote` output: one remote name per line.
pub fn parse_remotes(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
