use crate::oval::domain::{
    Advisory, AdvisoryCve, CheckEnumeration, Criteria, CriteriaChild, CriteriaOperator, Criterion,
    Definition, Document, EvrComparison, Generator, Metadata, Reference, RpmInfoObject,
    RpmInfoState, RpmInfoTest, VersionComparison, DEFAULT_OPERATION,
};
use crate::ports::outbound::DocumentParser;
use crate::shared::error::OvalError;
use crate::shared::Result;
use roxmltree::{Children, Node};

type ParseResult<T> = std::result::Result<T, OvalError>;

const ROOT_ELEMENT: &str = "oval_definitions";

/// Maximum `<criteria>` nesting accepted in a definition
///
/// Checked on the raw text before the XML parser builds its tree, to prevent
/// stack overflow on hostile input.
pub const MAX_CRITERIA_DEPTH: usize = 1_000;

/// Element nesting allowed overall: the criteria trees plus the document
/// scaffolding around them
const MAX_ELEMENT_DEPTH: usize = MAX_CRITERIA_DEPTH + 32;

/// Markup that never opens an element, as (opener, closer) pairs
const SKIPPED_MARKUP: [(&[u8], &[u8]); 4] = [
    (b"<!--", b"-->"),
    (b"<![CDATA[", b"]]>"),
    (b"<?", b"?>"),
    (b"<!", b">"),
];

/// OvalXmlParser adapter turning OVAL XML into the document model
///
/// Elements are matched by local name, so vendor namespace prefixes
/// (`red-def:`, `linux-def:`) do not matter. Only the RPM-info flavour of
/// tests, objects and states is collected; every other element, including
/// signatures, variables, notes and filters, is skipped.
pub struct OvalXmlParser;

impl OvalXmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OvalXmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for OvalXmlParser {
    fn parse(&self, bytes: &[u8]) -> Result<Document> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| malformed(format!("document is not valid UTF-8: {}", e)))?;
        check_nesting_depth(text)?;
        let xml = roxmltree::Document::parse(text).map_err(|e| malformed(e.to_string()))?;

        let root = xml.root_element();
        if root.tag_name().name() != ROOT_ELEMENT {
            return Err(malformed(format!(
                "root element is <{}>, expected <{}>",
                root.tag_name().name(),
                ROOT_ELEMENT
            ))
            .into());
        }

        let generator = child(root, "generator").map(parse_generator);

        let definitions = match child(root, "definitions") {
            Some(node) => children_named(node, "definition")
                .map(parse_definition)
                .collect::<ParseResult<Vec<_>>>()?,
            None => Vec::new(),
        };
        let tests = collect_section(root, "tests", "rpminfo_test", parse_test)?;
        let objects = collect_section(root, "objects", "rpminfo_object", parse_object)?;
        let states = collect_section(root, "states", "rpminfo_state", parse_state)?;

        Ok(Document::new(generator, definitions, tests, objects, states))
    }
}

fn malformed(details: impl Into<String>) -> OvalError {
    OvalError::MalformedDocument {
        details: details.into(),
    }
}

/// Scans start and end tags without building a tree and rejects documents
/// nested beyond [`MAX_CRITERIA_DEPTH`] or [`MAX_ELEMENT_DEPTH`].
///
/// Comments, CDATA, processing instructions and declarations are skipped.
/// Truncated markup is left for the XML parser to report.
fn check_nesting_depth(text: &str) -> ParseResult<()> {
    let bytes = text.as_bytes();
    let mut open: Vec<bool> = Vec::new();
    let mut criteria_depth = 0usize;
    let mut pos = 0;

    while let Some(offset) = bytes[pos..].iter().position(|&b| b == b'<') {
        let start = pos + offset;
        let rest = &bytes[start..];

        let skipped = SKIPPED_MARKUP
            .iter()
            .find(|(opener, _)| rest.starts_with(opener))
            .map(|(_, closer)| (find(rest, closer), closer.len()));
        if let Some((end, len)) = skipped {
            match end {
                Some(end) => pos = start + end + len,
                None => return Ok(()),
            }
            continue;
        }

        let Some(end) = tag_end(rest) else {
            return Ok(());
        };
        pos = start + end + 1;

        if rest.starts_with(b"</") {
            if open.pop() == Some(true) {
                criteria_depth -= 1;
            }
            continue;
        }
        if rest[end - 1] == b'/' {
            continue;
        }

        let name_len = rest[1..end]
            .iter()
            .position(|b| b.is_ascii_whitespace() || *b == b'/')
            .unwrap_or(end - 1);
        let name = &rest[1..1 + name_len];
        let local = name.rsplit(|&b| b == b':').next().unwrap_or(name);
        let is_criteria = local == b"criteria";

        open.push(is_criteria);
        if is_criteria {
            criteria_depth += 1;
            if criteria_depth > MAX_CRITERIA_DEPTH {
                return Err(malformed(format!(
                    "<criteria> nested deeper than {} levels",
                    MAX_CRITERIA_DEPTH
                )));
            }
        }
        if open.len() > MAX_ELEMENT_DEPTH {
            return Err(malformed(format!(
                "elements nested deeper than {} levels",
                MAX_ELEMENT_DEPTH
            )));
        }
    }
    Ok(())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Index of the `>` closing the tag at the start of `tag`, ignoring any
/// inside quoted attribute values
fn tag_end(tag: &[u8]) -> Option<usize> {
    let mut quote = None;
    for (i, &b) in tag.iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i),
            None => {}
        }
    }
    None
}

fn position(node: Node<'_, '_>) -> String {
    let pos = node.document().text_pos_at(node.range().start);
    format!("line {}, column {}", pos.row, pos.col)
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Direct text content of an element, trimmed; `None` when empty
fn text_of(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name).and_then(text_of)
}

fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

fn required_attr(node: Node<'_, '_>, name: &str) -> ParseResult<String> {
    node.attribute(name).map(str::to_string).ok_or_else(|| {
        malformed(format!(
            "<{}> at {} is missing required attribute '{}'",
            node.tag_name().name(),
            position(node),
            name
        ))
    })
}

fn bool_attr(node: Node<'_, '_>, name: &str) -> ParseResult<bool> {
    match node.attribute(name).map(str::trim) {
        None => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(malformed(format!(
            "<{}> at {} has invalid boolean '{}' for attribute '{}'",
            node.tag_name().name(),
            position(node),
            other,
            name
        ))),
    }
}

fn collect_section<T>(
    root: Node<'_, '_>,
    section: &str,
    element: &str,
    parse: fn(Node<'_, '_>) -> ParseResult<T>,
) -> ParseResult<Vec<T>> {
    match child(root, section) {
        Some(node) => children_named(node, element).map(parse).collect(),
        None => Ok(Vec::new()),
    }
}

fn parse_generator(node: Node<'_, '_>) -> Generator {
    Generator::new(
        child_text(node, "product_name"),
        child_text(node, "product_version"),
    )
    .with_schema_version(child_text(node, "schema_version"))
    .with_timestamp(child_text(node, "timestamp"))
}

fn parse_definition(node: Node<'_, '_>) -> ParseResult<Definition> {
    let id = attr(node, "id");

    let metadata_node = child(node, "metadata").ok_or_else(|| {
        malformed(format!(
            "<definition> {}at {} has no <metadata> element",
            id.as_deref().map(|id| format!("'{}' ", id)).unwrap_or_default(),
            position(node)
        ))
    })?;
    let metadata = parse_metadata(metadata_node)?;

    let label = id.clone().unwrap_or_else(|| metadata.title().to_string());

    let deprecated = bool_attr(node, "deprecated")?;

    let definition = match child(node, "criteria") {
        Some(criteria_node) => {
            let criteria = parse_criteria_tree(criteria_node, &label)?;
            Definition::new(metadata, criteria).with_deprecated(deprecated)
        }
        // retired definitions are often published as metadata only
        None if deprecated => Definition::deprecated_without_criteria(metadata),
        None => {
            return Err(malformed(format!(
                "definition '{}' at {} has no <criteria> element",
                label,
                position(node)
            )))
        }
    };

    Ok(definition.with_attributes(
        id,
        attr(node, "class"),
        attr(node, "version"),
    ))
}

fn parse_metadata(node: Node<'_, '_>) -> ParseResult<Metadata> {
    let references = children_named(node, "reference")
        .map(|reference| {
            Ok(Reference::new(
                required_attr(reference, "source")?,
                attr(reference, "ref_id"),
                attr(reference, "ref_url"),
            ))
        })
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(Metadata::new(
        child_text(node, "title").unwrap_or_default(),
        child_text(node, "description").unwrap_or_default(),
        references,
        child(node, "advisory").map(parse_advisory),
    ))
}

fn parse_advisory(node: Node<'_, '_>) -> Advisory {
    let cves = children_named(node, "cve")
        .filter_map(|cve| text_of(cve).map(|id| AdvisoryCve::new(id, attr(cve, "href"))))
        .collect();

    Advisory::new(attr(node, "from"), child_text(node, "severity"))
        .with_rights(child_text(node, "rights"))
        .with_dates(
            child(node, "issued").and_then(|n| attr(n, "date")),
            child(node, "updated").and_then(|n| attr(n, "date")),
        )
        .with_cves(cves)
}

fn parse_operator(node: Node<'_, '_>, definition: &str) -> ParseResult<CriteriaOperator> {
    let ambiguous = |value: Option<String>| OvalError::AmbiguousOperator {
        definition: definition.to_string(),
        value,
    };

    match node.attribute("operator").map(str::trim) {
        None | Some("") => Err(ambiguous(None)),
        Some(raw) => raw
            .parse::<CriteriaOperator>()
            .map_err(|_| ambiguous(Some(raw.to_string()))),
    }
}

fn parse_criterion(node: Node<'_, '_>) -> ParseResult<Criterion> {
    Ok(Criterion::new(
        required_attr(node, "test_ref")?,
        node.attribute("comment").unwrap_or_default(),
    )
    .with_negate(bool_attr(node, "negate")?))
}

/// A `<criteria>` element whose children are still being read
struct OpenCriteria<'a, 'input> {
    pending: Children<'a, 'input>,
    operator: CriteriaOperator,
    negate: bool,
    comment: Option<String>,
    children: Vec<CriteriaChild>,
}

impl<'a, 'input> OpenCriteria<'a, 'input> {
    fn open(node: Node<'a, 'input>, definition: &str) -> ParseResult<Self> {
        Ok(Self {
            pending: node.children(),
            operator: parse_operator(node, definition)?,
            negate: bool_attr(node, "negate")?,
            comment: attr(node, "comment"),
            children: Vec::new(),
        })
    }

    fn close(self) -> Criteria {
        let criteria = Criteria::new(self.operator, self.children).with_negate(self.negate);
        match self.comment {
            Some(comment) => criteria.with_comment(comment),
            None => criteria,
        }
    }
}

/// Builds the owned criteria tree with an explicit stack, preserving document
/// order of interleaved `<criteria>` and `<criterion>` children
fn parse_criteria_tree(root: Node<'_, '_>, definition: &str) -> ParseResult<Criteria> {
    let mut current = OpenCriteria::open(root, definition)?;
    let mut parents = Vec::new();

    loop {
        match current.pending.next() {
            Some(node) if node.is_element() => match node.tag_name().name() {
                "criteria" => {
                    let open = OpenCriteria::open(node, definition)?;
                    parents.push(std::mem::replace(&mut current, open));
                }
                "criterion" => {
                    let criterion = parse_criterion(node)?;
                    current.children.push(CriteriaChild::Criterion(criterion));
                }
                // extend_definition and vendor extensions
                _ => {}
            },
            Some(_) => {}
            None => {
                let done = current.close();
                match parents.pop() {
                    Some(mut parent) => {
                        parent.children.push(CriteriaChild::Criteria(done));
                        current = parent;
                    }
                    None => return Ok(done),
                }
            }
        }
    }
}

fn parse_test(node: Node<'_, '_>) -> ParseResult<RpmInfoTest> {
    let id = required_attr(node, "id")?;
    let check = required_attr(node, "check")?
        .parse::<CheckEnumeration>()
        .map_err(|e| malformed(format!("rpminfo_test '{}' at {}: {}", id, position(node), e)))?;

    let object_ref = single_ref(node, &id, "object", "object_ref")?;
    let state_ref = single_ref(node, &id, "state", "state_ref")?;

    let mut test = RpmInfoTest::new(id, check, object_ref, state_ref);
    if let Some(version) = attr(node, "version") {
        test = test.with_version(version);
    }
    if let Some(comment) = attr(node, "comment") {
        test = test.with_comment(comment);
    }
    if let Some(check_existence) = attr(node, "check_existence") {
        test = test.with_check_existence(check_existence);
    }
    Ok(test)
}

/// Reads the reference attribute of the one `<object>` / `<state>` child of a test
fn single_ref(test: Node<'_, '_>, id: &str, element: &str, attribute: &str) -> ParseResult<String> {
    let mut matches = children_named(test, element);
    match (matches.next(), matches.next()) {
        (Some(node), None) => required_attr(node, attribute),
        (None, _) => Err(malformed(format!(
            "rpminfo_test '{}' at {} has no <{}> reference",
            id,
            position(test),
            element
        ))),
        (Some(_), Some(_)) => Err(malformed(format!(
            "rpminfo_test '{}' at {} has more than one <{}> reference",
            id,
            position(test),
            element
        ))),
    }
}

fn parse_object(node: Node<'_, '_>) -> ParseResult<RpmInfoObject> {
    let id = required_attr(node, "id")?;
    let name = child_text(node, "name").ok_or_else(|| {
        malformed(format!(
            "rpminfo_object '{}' at {} has no package <name>",
            id,
            position(node)
        ))
    })?;

    let object = RpmInfoObject::new(id, name);
    Ok(match attr(node, "version") {
        Some(version) => object.with_version(version),
        None => object,
    })
}

fn parse_state(node: Node<'_, '_>) -> ParseResult<RpmInfoState> {
    let mut state = RpmInfoState::new(required_attr(node, "id")?);

    if let Some(version) = attr(node, "version") {
        state = state.with_version(version);
    }
    if let Some(evr) = child(node, "evr") {
        state = state.with_evr(EvrComparison::new(
            attr(evr, "datatype"),
            operation_of(evr),
            text_of(evr).unwrap_or_default(),
        ));
    }
    if let Some(version) = child(node, "version") {
        state = state.with_version_check(VersionComparison::new(
            operation_of(version),
            text_of(version).unwrap_or_default(),
        ));
    }
    Ok(state)
}

fn operation_of(node: Node<'_, '_>) -> String {
    node.attribute("operation")
        .unwrap_or(DEFAULT_OPERATION)
        .to_string()
}
