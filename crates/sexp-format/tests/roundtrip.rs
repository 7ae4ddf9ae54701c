//! Writer output must always re-parse, and replaying the parse events
//! through a second writer must reproduce the bytes exactly.

use std::ops::ControlFlow;

use proptest::prelude::*;

use sexp_format::{SexpWriter, Sink};
use sexp_parse::{Event, ParseCallback, Parser};

#[derive(Debug, Clone)]
enum Element {
    Atom(Vec<u8>),
    List(Doc),
}

/// A writable document: every list has a bare-atom name.
#[derive(Debug, Clone)]
struct Doc {
    name: Vec<u8>,
    elements: Vec<Element>,
}

fn write_doc<S: Sink>(writer: &mut SexpWriter<S>, doc: &Doc) {
    writer.start_list(&doc.name).expect("start_list");
    for element in &doc.elements {
        match element {
            Element::Atom(value) => writer.write_atom(value).expect("write_atom"),
            Element::List(inner) => write_doc(writer, inner),
        }
    }
    writer.end_list().expect("end_list");
}

fn expected_events(doc: &Doc, depth: u32, out: &mut Vec<Event>) {
    out.push(Event::BeginList {
        name: doc.name.clone(),
        depth,
    });
    for element in &doc.elements {
        match element {
            Element::Atom(value) => out.push(Event::Atom {
                value: value.clone(),
                depth: depth + 1,
            }),
            Element::List(inner) => expected_events(inner, depth + 1, out),
        }
    }
    out.push(Event::EndList { depth });
}

/// Feeds parse events straight back into a writer.
struct Replay {
    writer: SexpWriter<Vec<u8>>,
}

impl ParseCallback for Replay {
    fn begin_list(&mut self, name: &[u8], _depth: u32) -> ControlFlow<()> {
        self.writer.start_list(name).expect("start_list");
        ControlFlow::Continue(())
    }

    fn end_list(&mut self, _depth: u32) -> ControlFlow<()> {
        self.writer.end_list().expect("end_list");
        ControlFlow::Continue(())
    }

    fn atom(&mut self, atom: &[u8], _depth: u32) -> ControlFlow<()> {
        self.writer.write_atom(atom).expect("write_atom");
        ControlFlow::Continue(())
    }
}

const ATOM_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789+-*/";

fn list_name() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(ATOM_CHARS.to_vec()), 1..8)
}

fn atom_value() -> impl Strategy<Value = Vec<u8>> {
    // Arbitrary bytes: exercises the bare/quoted decision and escaping.
    prop::collection::vec(any::<u8>(), 0..12)
}

fn doc_strategy() -> impl Strategy<Value = Doc> {
    let leaf = (
        list_name(),
        prop::collection::vec(atom_value().prop_map(Element::Atom), 0..6),
    )
        .prop_map(|(name, elements)| Doc { name, elements });

    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            list_name(),
            prop::collection::vec(
                prop_oneof![
                    atom_value().prop_map(Element::Atom),
                    inner.prop_map(Element::List),
                ],
                0..6,
            ),
        )
            .prop_map(|(name, elements)| Doc { name, elements })
    })
}

proptest! {
    #[test]
    fn written_documents_reparse(doc in doc_strategy()) {
        let mut writer = SexpWriter::new(Vec::new());
        write_doc(&mut writer, &doc);
        let output = writer.into_inner();

        let events = Parser::new(&output).parse_to_vec().expect("writer output must parse");

        let mut expected = Vec::new();
        expected_events(&doc, 0, &mut expected);
        prop_assert_eq!(events, expected);
    }

    #[test]
    fn replayed_events_reproduce_bytes(doc in doc_strategy()) {
        let mut writer = SexpWriter::new(Vec::new());
        write_doc(&mut writer, &doc);
        let first = writer.into_inner();

        let mut replay = Replay { writer: SexpWriter::new(Vec::new()) };
        Parser::new(&first).parse(&mut replay).expect("writer output must parse");
        let second = replay.writer.into_inner();

        prop_assert_eq!(first, second);
    }
}

#[test]
fn mixed_document_roundtrips() {
    let mut writer = SexpWriter::new(Vec::new());
    writer.start_list(b"entry").unwrap();
    writer.write_atom(b"plain").unwrap();
    writer.write_atom(br#"needs "quotes" and \slashes\"#).unwrap();
    writer.write_list(b"inner", [b"1", b"2"]).unwrap();
    writer.end_list().unwrap();
    let first = writer.into_inner();

    let mut replay = Replay {
        writer: SexpWriter::new(Vec::new()),
    };
    Parser::new(&first).parse(&mut replay).unwrap();
    assert_eq!(replay.writer.into_inner(), first);
}
