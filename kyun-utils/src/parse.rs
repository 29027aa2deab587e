/// Split a prefixed message into a lowercase command name and its trimmed remainder.
///
/// Returns `None` when the message does not start with `prefix` or names no command.
pub fn split_command<'a>(content: &'a str, prefix: &str) -> Option<(String, Option<&'a str>)> {
    let content = content.trim().strip_prefix(prefix)?.trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let command = command_and_rest.next().filter(|cmd| !cmd.is_empty())?;
    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    Some((command.to_ascii_lowercase(), rest))
}

/// Split off the first whitespace-delimited argument.
pub fn split_first_arg(raw: Option<&str>) -> (Option<&str>, Option<&str>) {
    let Some(value) = raw else {
        return (None, None);
    };

    let mut args = value.trim().splitn(2, char::is_whitespace);
    let first = args.next().filter(|arg| !arg.is_empty());
    let tail = args
        .next()
        .map(str::trim)
        .filter(|remaining| !remaining.is_empty());

    (first, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_command_and_rest() {
        assert_eq!(
            split_command("!Search anime  Frieren ", "!"),
            Some(("search".to_owned(), Some("anime  Frieren")))
        );
        assert_eq!(split_command("!ping", "!"), Some(("ping".to_owned(), None)));
        assert_eq!(split_command("ping", "!"), None);
        assert_eq!(split_command("!   ", "!"), None);
    }

    #[test]
    fn splits_first_argument() {
        assert_eq!(
            split_first_arg(Some("ptw some_user manga")),
            (Some("ptw"), Some("some_user manga"))
        );
        assert_eq!(split_first_arg(Some("ptw")), (Some("ptw"), None));
        assert_eq!(split_first_arg(None), (None, None));
    }
}
