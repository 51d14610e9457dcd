use crate::ast::{Command, OutputMode, OutputRedirect, Redirections};
use crate::error::RedirectError;

/// Pulls `<`, `>` and `>>` (each followed by a file name) out of `tokens`.
///
/// At most one input and one output redirection are accepted. The word right
/// after an operator is always taken as its file name.
pub fn resolve(tokens: &[String]) -> Result<Command, RedirectError> {
    let mut argv = Vec::with_capacity(tokens.len());
    let mut redirects = Redirections::default();

    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            "<" => {
                if redirects.input.is_some() {
                    return Err(RedirectError::MultipleInputRedirection);
                }
                let file = iter
                    .next()
                    .ok_or_else(|| RedirectError::MissingRedirectionTarget(token.clone()))?;
                redirects.input = Some(file.clone());
            }
            ">" | ">>" => {
                if redirects.output.is_some() {
                    return Err(RedirectError::MultipleOutputRedirection);
                }
                let file = iter
                    .next()
                    .ok_or_else(|| RedirectError::MissingRedirectionTarget(token.clone()))?;
                let mode = if token == ">>" {
                    OutputMode::Append
                } else {
                    OutputMode::Truncate
                };
                redirects.output = Some(OutputRedirect {
                    path: file.clone(),
                    mode,
                });
            }
            _ => argv.push(token.clone()),
        }
    }

    if argv.is_empty() {
        return Err(RedirectError::EmptyCommand);
    }
    Ok(Command { argv, redirects })
}
