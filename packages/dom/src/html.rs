//! HTML serialization of a document tree.

use crate::{Document, NodeData, NodeId};

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Put every element on its own line. Changes inter-element whitespace,
    /// so leave it off when the output is compared character by character.
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: HtmlOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_indent(&mut self) {
        if self.options.pretty {
            let indent = self.options.indent.repeat(self.depth);
            self.buffer.push_str(&indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize everything under the root
pub fn to_html(doc: &Document, options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    for child in doc.children(doc.root()) {
        write_node(doc, *child, &mut ctx);
    }
    ctx.get_output()
}

fn write_node(doc: &Document, id: NodeId, ctx: &mut Context) {
    let Some(data) = doc.data(id) else {
        return;
    };
    match data {
        NodeData::Document => {
            for child in doc.children(id) {
                write_node(doc, *child, ctx);
            }
        }
        NodeData::Text { content } => {
            ctx.add_indent();
            ctx.add(&escape_text(content));
            ctx.newline();
        }
        NodeData::Comment { content } => {
            ctx.add_indent();
            ctx.add(&format!("<!--{}-->", content));
            ctx.newline();
        }
        NodeData::Element { tag, attributes } => {
            ctx.add_indent();
            ctx.add(&format!("<{}", tag));
            for (name, value) in attributes {
                ctx.add(&format!(" {}=\"{}\"", name, escape_attribute(value)));
            }

            let children = doc.children(id);
            if children.is_empty() && is_void(tag) {
                ctx.add(">");
                ctx.newline();
                return;
            }
            ctx.add(">");
            ctx.newline();

            ctx.depth += 1;
            for child in children {
                write_node(doc, *child, ctx);
            }
            ctx.depth -= 1;

            ctx.add_indent();
            ctx.add(&format!("</{}>", tag));
            ctx.newline();
        }
    }
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
