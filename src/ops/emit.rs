//! YAML emission.
//!
//! The project is serialized with `serde_yaml` and rendered in block style
//! with sequences indented under their parent key. Every line then loses
//! one level of indentation so the variant list lines up with a
//! hand-written `config.yml`:
//!
//! ```yaml
//! buildvariants:
//! - name: test-rhel8-py3.9-auth-ssl
//!   display_name: Test RHEL8 py3.9 Auth SSL
//!   tasks:
//!     - name: .standalone
//! ```

use serde_yaml::{Mapping, Value};

use crate::core::variant::Project;
use crate::matrix::errors::Result;

/// Prefix removed from every emitted line.
pub const DEDENT: &str = "  ";

const INDENT: usize = 2;

/// Serialize a project to the pipeline's YAML schema.
pub fn generate_yaml(project: &Project) -> Result<String> {
    let value = serde_yaml::to_value(project)?;

    let mut out = String::new();
    render(&mut out, &value, 0)?;

    Ok(dedent(&out))
}

/// Strip [`DEDENT`] from the start of every line that has it.
pub fn dedent(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(line.strip_prefix(DEDENT).unwrap_or(line));
        out.push('\n');
    }
    out
}

fn render(out: &mut String, value: &Value, indent: usize) -> Result<()> {
    match value {
        Value::Mapping(map) if !map.is_empty() => render_mapping(out, map, indent),
        Value::Sequence(seq) if !seq.is_empty() => render_sequence(out, seq, indent),
        scalar => {
            push_indent(out, indent);
            out.push_str(&scalar_text(scalar, indent)?);
            out.push('\n');
            Ok(())
        }
    }
}

fn render_mapping(out: &mut String, map: &Mapping, indent: usize) -> Result<()> {
    for (key, value) in map {
        push_indent(out, indent);
        out.push_str(&scalar_text(key, indent + INDENT)?);
        out.push(':');

        match value {
            Value::Mapping(m) if !m.is_empty() => {
                out.push('\n');
                render_mapping(out, m, indent + INDENT)?;
            }
            Value::Sequence(s) if !s.is_empty() => {
                out.push('\n');
                render_sequence(out, s, indent + INDENT)?;
            }
            scalar => {
                out.push(' ');
                out.push_str(&scalar_text(scalar, indent + INDENT)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

fn render_sequence(out: &mut String, seq: &[Value], indent: usize) -> Result<()> {
    let item_indent = " ".repeat(indent + INDENT);

    for item in seq {
        // Render the item one level deeper, then put the dash where the
        // first line's indentation was.
        let mut nested = String::new();
        render(&mut nested, item, indent + INDENT)?;

        push_indent(out, indent);
        out.push_str("- ");
        out.push_str(nested.strip_prefix(&item_indent).unwrap_or(&nested));
    }
    Ok(())
}

/// Inline text for a scalar. Block scalars and folded strings span several
/// lines; those after the first are re-indented to `indent`.
fn scalar_text(value: &Value, indent: usize) -> Result<String> {
    let text = match value {
        Value::Mapping(_) => return Ok("{}".to_string()),
        Value::Sequence(_) => return Ok("[]".to_string()),
        other => serde_yaml::to_string(other)?,
    };
    let text = text.strip_suffix('\n').unwrap_or(&text);

    let mut lines = text.lines();
    let mut out = lines.next().unwrap_or_default().to_string();
    let rest: Vec<&str> = lines.collect();

    let base = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    for line in rest {
        out.push('\n');
        if !line.trim().is_empty() {
            push_indent(&mut out, indent);
            out.push_str(&line[base..]);
        }
    }
    Ok(out)
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}
