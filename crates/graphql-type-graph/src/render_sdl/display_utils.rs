use std::fmt::{self, Write};

use crate::{Directive, InputValueDefinition};

pub(super) const INDENT: &str = "  ";

pub(crate) fn write_quoted(sdl: &mut impl Write, s: &str) -> fmt::Result {
    sdl.write_char('"')?;
    for c in s.chars() {
        match c {
            '\r' => sdl.write_str("\\r"),
            '\n' => sdl.write_str("\\n"),
            '\t' => sdl.write_str("\\t"),
            '\\' => sdl.write_str("\\\\"),
            '"' => sdl.write_str("\\\""),
            c if c.is_control() => write!(sdl, "\\u{:04X}", c as u32),
            c => sdl.write_char(c),
        }?
    }
    sdl.write_char('"')
}

pub(super) fn write_block(
    f: &mut fmt::Formatter<'_>,
    inner: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    f.write_str("{\n")?;
    inner(f)?;
    f.write_char('}')
}

/// Single line descriptions that survive block string processing unchanged are written as
/// block strings, everything else as an escaped string.
pub(super) fn write_description(f: &mut fmt::Formatter<'_>, description: Option<&str>, indent: &str) -> fmt::Result {
    let Some(description) = description else { return Ok(()) };

    f.write_str(indent)?;

    let block_safe = !description.trim().is_empty()
        && description.trim() == description
        && !description.contains(['\n', '\r'])
        && !description.contains("\"\"\"")
        && !description.ends_with('"')
        && !description.contains('\\');

    if block_safe {
        write!(f, r#""""{description}""""#)?;
    } else {
        write_quoted(f, description)?;
    }

    f.write_char('\n')
}

pub(super) fn write_directives(f: &mut fmt::Formatter<'_>, directives: &[Directive]) -> fmt::Result {
    for directive in directives {
        write!(f, " {directive}")?;
    }

    Ok(())
}

/// Arguments go on one line, unless one of them has a description. Then each goes on its own
/// line, one level deeper than `indent`.
pub(super) fn write_arguments<'a>(
    f: &mut fmt::Formatter<'_>,
    arguments: impl ExactSizeIterator<Item = &'a InputValueDefinition> + Clone,
    indent: &str,
) -> fmt::Result {
    if arguments.len() == 0 {
        return Ok(());
    }

    let multiline = arguments.clone().any(|argument| argument.description.is_some());

    f.write_char('(')?;

    if multiline {
        f.write_char('\n')?;

        for argument in arguments {
            let argument_indent = format!("{indent}{INDENT}");

            write_description(f, argument.description.as_deref(), &argument_indent)?;
            f.write_str(&argument_indent)?;
            write_input_value(f, argument)?;
            f.write_char('\n')?;
        }

        f.write_str(indent)?;
    } else {
        let mut arguments = arguments.peekable();

        while let Some(argument) = arguments.next() {
            write_input_value(f, argument)?;

            if arguments.peek().is_some() {
                f.write_str(", ")?;
            }
        }
    }

    f.write_char(')')
}

/// `name: Type = default @directives`, without description or indentation.
pub(super) fn write_input_value(f: &mut fmt::Formatter<'_>, input_value: &InputValueDefinition) -> fmt::Result {
    write!(f, "{}: {}", input_value.name, input_value.ty)?;

    if let Some(default_value) = &input_value.default_value {
        write!(f, " = {default_value}")?;
    }

    write_directives(f, &input_value.directives)
}
