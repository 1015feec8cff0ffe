//! sol25c-xml - XML serialization of a validated SOL25 program.
//!
//! A pure function over the AST: the whole document is rendered on one
//! line after the declaration, elements in source order, ordering carried
//! by explicit `order` attributes. The emitter never fails; every AST
//! shape the parser can produce has a rendering.

mod escape;

use sol25c_par::{Block, ClassDecl, Expr, LiteralKind, Method, Program, Stmt};

use escape::{escape_attr, rewrite_literal_values};

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Placeholder that keeps description spaces visible through escaping; a
/// final pass turns the escaped form back into a plain space.
const NBSP: &str = "&nbsp;";

/// Serialize `program` to the complete XML document, without a trailing
/// newline.
pub fn emit(program: &Program) -> String {
    let mut w = XmlWriter::new();
    write_program(&mut w, program);

    let xml = rewrite_literal_values(&w.finish());
    format!("{}{}", DECLARATION, xml.replace("&amp;nbsp;", " "))
}

fn write_program(w: &mut XmlWriter, program: &Program) {
    w.open("program");
    w.attr("language", "SOL25");
    if let Some(description) = &program.description {
        w.attr("description", &description.replace(' ', NBSP));
    }

    if program.classes.is_empty() {
        w.close_empty();
        return;
    }

    w.close_open();
    for class in &program.classes {
        write_class(w, class);
    }
    w.end("program");
}

fn write_class(w: &mut XmlWriter, class: &ClassDecl) {
    w.open("class");
    w.attr("name", &class.name);
    w.attr("parent", &class.parent);

    if class.methods.is_empty() {
        w.close_empty();
        return;
    }

    w.close_open();
    for method in &class.methods {
        write_method(w, method);
    }
    w.end("class");
}

fn write_method(w: &mut XmlWriter, method: &Method) {
    w.open("method");
    w.attr("selector", &method.selector);
    w.close_open();
    write_block(w, &method.body);
    w.end("method");
}

fn write_block(w: &mut XmlWriter, block: &Block) {
    w.open("block");
    w.attr("arity", &block.parameters.len().to_string());

    if block.parameters.is_empty() && block.statements.is_empty() {
        w.close_empty();
        return;
    }

    w.close_open();
    for param in &block.parameters {
        w.open("parameter");
        w.attr("name", &param.name);
        w.attr("order", &param.order.to_string());
        w.close_empty();
    }
    for stmt in &block.statements {
        write_stmt(w, stmt);
    }
    w.end("block");
}

fn write_stmt(w: &mut XmlWriter, stmt: &Stmt) {
    w.open("assign");
    w.attr("order", &stmt.order().to_string());
    w.close_open();

    if let Stmt::Assign { target, .. } = stmt {
        w.open("var");
        w.attr("name", target);
        w.close_empty();
    }

    w.open("expr");
    w.close_open();
    write_expr(w, stmt.value());
    w.end("expr");

    w.end("assign");
}

fn write_expr(w: &mut XmlWriter, expr: &Expr) {
    match expr {
        Expr::Literal { kind, value, .. } => {
            w.open("literal");
            w.attr("class", kind.class_name());
            w.attr("value", &literal_value(*kind, value));
            w.close_empty();
        },
        Expr::Var { name, .. } => {
            w.open("var");
            w.attr("name", name);
            w.close_empty();
        },
        Expr::Block(block) => write_block(w, block),
        Expr::Send {
            selector,
            target,
            args,
            ..
        } => {
            w.open("send");
            w.attr("selector", selector);
            w.close_open();

            w.open("expr");
            w.close_open();
            write_expr(w, target);
            w.end("expr");

            for (index, arg) in args.iter().enumerate() {
                w.open("arg");
                w.attr("order", &(index + 1).to_string());
                w.close_open();
                w.open("expr");
                w.close_open();
                write_expr(w, arg);
                w.end("expr");
                w.end("arg");
            }

            w.end("send");
        },
    }
}

/// Pre-encode a literal's attribute value. String values spell quotes as a
/// literal `&apos;` sequence and double their backslashes; the post-pass
/// in [`escape`] finishes the job after XML escaping.
fn literal_value(kind: LiteralKind, value: &str) -> String {
    match kind {
        LiteralKind::Str => value.replace('\'', "&apos;").replace('\\', "\\\\"),
        _ => value.to_string(),
    }
}

/// Minimal single-line XML writer: open tags, attributes, self-closing
/// empty elements.
struct XmlWriter {
    out: String,
}

impl XmlWriter {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn open(&mut self, name: &str) {
        self.out.push('<');
        self.out.push_str(name);
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&escape_attr(value));
        self.out.push('"');
    }

    fn close_open(&mut self) {
        self.out.push('>');
    }

    fn close_empty(&mut self) {
        self.out.push_str(" />");
    }

    fn end(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_source(source: &str) -> String {
        let tokens = sol25c_lex::tokenize(source).unwrap();
        let program = sol25c_par::parse(tokens).unwrap();
        emit(&program)
    }

    /// The document without the declaration line.
    fn body(source: &str) -> String {
        let xml = emit_source(source);
        let (declaration, body) = xml.split_once('\n').unwrap();
        assert_eq!(declaration, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        body.to_string()
    }

    #[test]
    fn test_minimal_program() {
        assert_eq!(
            body("class Main : Object { run [|]}"),
            "<program language=\"SOL25\"><class name=\"Main\" parent=\"Object\">\
             <method selector=\"run\"><block arity=\"0\" /></method></class></program>"
        );
    }

    #[test]
    fn test_description_spaces_survive() {
        let xml = body("\"My first program\" class Main : Object { run [|]}");
        assert!(
            xml.starts_with("<program language=\"SOL25\" description=\"My first program\">"),
            "{xml}"
        );
    }

    #[test]
    fn test_empty_class_is_self_closing() {
        let xml = body("class Main : Object { run [|]} class A : Object { }");
        assert!(xml.contains("<class name=\"A\" parent=\"Object\" />"), "{xml}");
    }

    #[test]
    fn test_parameters_and_arity() {
        let xml = body("class Main : Object { run [|] go:and: [:a :b | ] }");
        assert!(
            xml.contains(
                "<method selector=\"go:and:\"><block arity=\"2\">\
                 <parameter name=\"a\" order=\"1\" /><parameter name=\"b\" order=\"2\" />\
                 </block></method>"
            ),
            "{xml}"
        );
    }

    #[test]
    fn test_assignment_statement() {
        let xml = body("class Main : Object { run [| x := 42. ]}");
        assert!(
            xml.contains(
                "<block arity=\"0\"><assign order=\"1\"><var name=\"x\" />\
                 <expr><literal class=\"Integer\" value=\"42\" /></expr></assign></block>"
            ),
            "{xml}"
        );
    }

    #[test]
    fn test_expression_statement_has_no_var() {
        let xml = body("class Main : Object { run [| self x: 1. ]}");
        assert!(
            xml.contains(
                "<assign order=\"1\"><expr><send selector=\"x:\">\
                 <expr><var name=\"self\" /></expr>\
                 <arg order=\"1\"><expr><literal class=\"Integer\" value=\"1\" /></expr></arg>\
                 </send></expr></assign>"
            ),
            "{xml}"
        );
    }

    #[test]
    fn test_send_target_and_args_in_order() {
        let xml = body("class Main : Object { run [| x := 1 plus: 2 and: 3. ]}");
        assert!(
            xml.contains(
                "<send selector=\"plus:and:\"><expr><literal class=\"Integer\" value=\"1\" /></expr>\
                 <arg order=\"1\"><expr><literal class=\"Integer\" value=\"2\" /></expr></arg>\
                 <arg order=\"2\"><expr><literal class=\"Integer\" value=\"3\" /></expr></arg></send>"
            ),
            "{xml}"
        );
    }

    #[test]
    fn test_literal_kinds() {
        let xml = body(
            "class Main : Object { run [| a := true. b := false. c := nil. d := Integer. ]}",
        );
        assert!(xml.contains("<literal class=\"True\" value=\"true\" />"));
        assert!(xml.contains("<literal class=\"False\" value=\"false\" />"));
        assert!(xml.contains("<literal class=\"Nil\" value=\"nil\" />"));
        assert!(xml.contains("<literal class=\"class\" value=\"Integer\" />"));
    }

    #[test]
    fn test_signed_integer_value() {
        let xml = body("class Main : Object { run [| x := -5. ]}");
        assert!(xml.contains("<literal class=\"Integer\" value=\"-5\" />"), "{xml}");
    }

    #[test]
    fn test_string_quote_and_newline_encoding() {
        let xml = body(r"class Main : Object { run [| x := 'it\'s\nhere'. ]}");
        assert!(
            xml.contains(r#"<literal class="String" value="it\&apos;s\nhere" />"#),
            "{xml}"
        );
    }

    #[test]
    fn test_string_backslash_doubling() {
        let xml = body(r"class Main : Object { run [| x := 'a\\b'. ]}");
        assert!(
            xml.contains(r#"<literal class="String" value="a\\b" />"#),
            "{xml}"
        );
    }

    #[test]
    fn test_string_markup_stays_escaped() {
        let xml = body("class Main : Object { run [| x := 'a<b&c'. ]}");
        assert!(
            xml.contains(r#"<literal class="String" value="a&lt;b&amp;c" />"#),
            "{xml}"
        );
    }

    #[test]
    fn test_nested_block_expression() {
        let xml = body("class Main : Object { run [| b := [:x | ]. ]}");
        assert!(
            xml.contains(
                "<assign order=\"1\"><var name=\"b\" /><expr>\
                 <block arity=\"1\"><parameter name=\"x\" order=\"1\" /></block></expr></assign>"
            ),
            "{xml}"
        );
    }

    #[test]
    fn test_unary_send_chain_nests() {
        let xml = body("class Main : Object { run [| x := 1 asString print. ]}");
        assert!(
            xml.contains(
                "<send selector=\"print\"><expr><send selector=\"asString\">\
                 <expr><literal class=\"Integer\" value=\"1\" /></expr></send></expr></send>"
            ),
            "{xml}"
        );
    }

    #[test]
    fn test_deterministic_output() {
        let source = "\"desc\" class Main : Object { run [| x := 'a'. y := x. ]}";
        assert_eq!(emit_source(source), emit_source(source));
    }
}
