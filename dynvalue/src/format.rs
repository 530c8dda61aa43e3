//! JSON-like text rendering of a `Value`.
//!
//! `Display` writes compact text (`{"a":[1,2]}`); the alternate form `{:#}`
//! pretty-prints with a two-space indent. This is a debugging aid, not a
//! codec: doubles keep their Rust spelling (`3.0`, `NaN`, `inf`) and blobs
//! are written as `b64"..."`.

use alloc::string::String;
use core::fmt::{self, Write};

use crate::value::Value;

/// Renders `value` as indented JSON-like text.
pub fn format_value(value: &Value) -> String {
    let mut ctx = FormatContext::new(true);
    ctx.write_value(value);
    ctx.output
}

struct FormatContext {
    output: String,
    pretty: bool,
    indent: usize,
}

impl FormatContext {
    const fn new(pretty: bool) -> Self {
        Self {
            output: String::new(),
            pretty,
            indent: 0,
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }

    /// Separator after an element: newline when pretty, nothing when compact.
    fn open_line(&mut self) {
        if self.pretty {
            self.output.push('\n');
            self.write_indent();
        }
    }

    fn write_str_literal(&mut self, s: &str) {
        self.output.push('"');
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(self.output, "\\u{:04x}", c as u32);
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(b) => {
                let _ = write!(self.output, "{b}");
            }
            Value::Int64(i) => {
                let _ = write!(self.output, "{i}");
            }
            Value::UInt64(u) => {
                let _ = write!(self.output, "{u}");
            }
            Value::Double(d) => {
                let _ = write!(self.output, "{d:?}");
            }
            Value::String(s) => self.write_str_literal(s),
            Value::Blob(b) => {
                self.output.push_str("b64");
                self.write_str_literal(&b.to_base64());
            }
            Value::Array(items) => {
                if items.is_empty() {
                    self.output.push_str("[]");
                    return;
                }
                self.output.push('[');
                self.indent += 1;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                    }
                    self.open_line();
                    self.write_value(item);
                }
                self.indent -= 1;
                self.open_line();
                self.output.push(']');
            }
            Value::Object(obj) => {
                if obj.is_empty() {
                    self.output.push_str("{}");
                    return;
                }
                self.output.push('{');
                self.indent += 1;
                for (i, (key, val)) in obj.iter().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                    }
                    self.open_line();
                    self.write_str_literal(key);
                    self.output.push_str(if self.pretty { ": " } else { ":" });
                    self.write_value(val);
                }
                self.indent -= 1;
                self.open_line();
                self.output.push('}');
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ctx = FormatContext::new(f.alternate());
        ctx.write_value(self);
        f.write_str(&ctx.output)
    }
}
