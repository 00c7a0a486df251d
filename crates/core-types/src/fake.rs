//! Scripted in-memory [`DomPort`] for tests.
//!
//! Supports compound CSS selectors (`tag.class[attr='value']`) and comma
//! separated groups of them. Descendant combinators are rejected with a
//! driver error so tests fail loudly instead of silently matching nothing.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::{DomError, DomPort, Scope, Selector};

/// Description of a node appended with [`InMemoryDom::append`].
#[derive(Clone, Debug, Default)]
pub struct NodeSpec {
    tag: String,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    text: String,
    hidden: bool,
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// Adds one or more space separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// What a scripted click does. Clicks without a script simply succeed.
#[derive(Clone, Debug)]
pub enum ClickEffect {
    Succeed,
    Fail(DomError),
    AddClass(String),
    SetAttribute(String, String),
    Detach,
}

#[derive(Debug)]
struct Node {
    spec: NodeSpec,
    parent: Option<usize>,
    children: Vec<usize>,
    attached: bool,
    stale_budget: u32,
    clicks: VecDeque<ClickEffect>,
    calls: usize,
}

#[derive(Debug, Default)]
struct DomTree {
    nodes: Vec<Node>,
    click_log: Vec<Scope>,
}

impl DomTree {
    fn index(&self, scope: &Scope) -> Result<usize, DomError> {
        scope
            .id()
            .strip_prefix("node-")
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|idx| *idx < self.nodes.len())
            .ok_or_else(|| DomError::Driver(format!("unknown element reference {}", scope)))
    }

    fn is_attached(&self, mut idx: usize) -> bool {
        loop {
            let node = &self.nodes[idx];
            if !node.attached {
                return false;
            }
            match node.parent {
                Some(parent) => idx = parent,
                None => return true,
            }
        }
    }

    /// Resolves `scope` for an operation, consuming scripted staleness.
    fn enter(&mut self, scope: &Scope) -> Result<usize, DomError> {
        let idx = self.index(scope)?;
        self.nodes[idx].calls += 1;
        if !self.is_attached(idx) {
            return Err(DomError::Stale(scope.id().to_string()));
        }
        let node = &mut self.nodes[idx];
        if node.stale_budget > 0 {
            node.stale_budget -= 1;
            debug!(node = %scope, remaining = node.stale_budget, "scripted stale handle");
            return Err(DomError::Stale(scope.id().to_string()));
        }
        Ok(idx)
    }

    /// Attached children, last first.
    fn attached_children(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[idx]
            .children
            .iter()
            .rev()
            .copied()
            .filter(move |child| self.nodes[*child].attached)
    }

    /// Attached descendants in document order.
    fn descendants(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.attached_children(idx).collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.attached_children(next));
        }
        out
    }

    fn matching(&self, idx: usize, selector: &Selector) -> Result<Vec<Scope>, DomError> {
        let matcher = Matcher::parse(selector)?;
        Ok(self
            .descendants(idx)
            .into_iter()
            .filter(|candidate| matcher.matches(&self.nodes[*candidate].spec))
            .map(scope_for)
            .collect())
    }

    fn text(&self, idx: usize) -> String {
        let own = self.nodes[idx].spec.text.trim();
        let nested = self
            .descendants(idx)
            .into_iter()
            .map(|child| self.nodes[child].spec.text.trim())
            .filter(|text| !text.is_empty());
        std::iter::once(own)
            .filter(|text| !text.is_empty())
            .chain(nested)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn scope_for(idx: usize) -> Scope {
    Scope(format!("node-{}", idx))
}

/// In-memory console DOM with scripted failures.
#[derive(Debug)]
pub struct InMemoryDom {
    tree: Mutex<DomTree>,
}

impl Default for InMemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDom {
    /// Creates a document holding a single `html` root node.
    pub fn new() -> Self {
        let root = Node {
            spec: NodeSpec::new("html"),
            parent: None,
            children: Vec::new(),
            attached: true,
            stale_budget: 0,
            clicks: VecDeque::new(),
            calls: 0,
        };
        Self {
            tree: Mutex::new(DomTree {
                nodes: vec![root],
                click_log: Vec::new(),
            }),
        }
    }

    pub fn root(&self) -> Scope {
        scope_for(0)
    }

    /// Appends a child node and returns its handle.
    ///
    /// # Panics
    /// When `parent` was not created by this document.
    pub fn append(&self, parent: &Scope, spec: NodeSpec) -> Scope {
        let mut tree = self.tree.lock();
        let parent_idx = tree.index(parent).expect("parent belongs to this document");
        let idx = tree.nodes.len();
        tree.nodes.push(Node {
            spec,
            parent: Some(parent_idx),
            children: Vec::new(),
            attached: true,
            stale_budget: 0,
            clicks: VecDeque::new(),
            calls: 0,
        });
        tree.nodes[parent_idx].children.push(idx);
        scope_for(idx)
    }

    /// Detaches the node (and with it, its sub-tree).
    pub fn detach(&self, scope: &Scope) {
        let mut tree = self.tree.lock();
        if let Ok(idx) = tree.index(scope) {
            tree.nodes[idx].attached = false;
        }
    }

    /// The next `times` operations on `scope` fail with [`DomError::Stale`].
    pub fn fail_stale(&self, scope: &Scope, times: u32) {
        let mut tree = self.tree.lock();
        if let Ok(idx) = tree.index(scope) {
            tree.nodes[idx].stale_budget = times;
        }
    }

    /// Queues effects consumed by successive clicks on `scope`.
    pub fn script_clicks(&self, scope: &Scope, effects: impl IntoIterator<Item = ClickEffect>) {
        let mut tree = self.tree.lock();
        if let Ok(idx) = tree.index(scope) {
            tree.nodes[idx].clicks.extend(effects);
        }
    }

    pub fn set_displayed(&self, scope: &Scope, displayed: bool) {
        let mut tree = self.tree.lock();
        if let Ok(idx) = tree.index(scope) {
            tree.nodes[idx].spec.hidden = !displayed;
        }
    }

    pub fn add_class(&self, scope: &Scope, class: &str) {
        let mut tree = self.tree.lock();
        if let Ok(idx) = tree.index(scope) {
            tree.nodes[idx].spec.classes.push(class.to_string());
        }
    }

    /// Every click attempt that reached a node, in order, including failed ones.
    pub fn clicks(&self) -> Vec<Scope> {
        self.tree.lock().click_log.clone()
    }

    /// Number of port operations issued against `scope`.
    pub fn calls(&self, scope: &Scope) -> usize {
        let tree = self.tree.lock();
        tree.index(scope)
            .map(|idx| tree.nodes[idx].calls)
            .unwrap_or(0)
    }
}

#[async_trait]
impl DomPort for InMemoryDom {
    async fn find_all(&self, scope: &Scope, selector: &Selector) -> Result<Vec<Scope>, DomError> {
        let mut tree = self.tree.lock();
        let idx = tree.enter(scope)?;
        tree.matching(idx, selector)
    }

    async fn find_first(&self, scope: &Scope, selector: &Selector) -> Result<Scope, DomError> {
        let mut tree = self.tree.lock();
        let idx = tree.enter(scope)?;
        tree.matching(idx, selector)?
            .into_iter()
            .next()
            .ok_or_else(|| DomError::NoSuchElement {
                scope: scope.to_string(),
                selector: selector.to_string(),
            })
    }

    async fn text(&self, scope: &Scope) -> Result<String, DomError> {
        let mut tree = self.tree.lock();
        let idx = tree.enter(scope)?;
        Ok(tree.text(idx))
    }

    async fn attribute(&self, scope: &Scope, name: &str) -> Result<Option<String>, DomError> {
        let mut tree = self.tree.lock();
        let idx = tree.enter(scope)?;
        let spec = &tree.nodes[idx].spec;
        if name == "class" {
            return Ok(Some(spec.classes.join(" ")));
        }
        Ok(spec.attributes.get(name).cloned())
    }

    async fn is_displayed(&self, scope: &Scope) -> Result<bool, DomError> {
        let mut tree = self.tree.lock();
        let idx = tree.enter(scope)?;
        Ok(!tree.nodes[idx].spec.hidden)
    }

    async fn is_attached(&self, scope: &Scope) -> Result<bool, DomError> {
        let mut tree = self.tree.lock();
        let idx = tree.index(scope)?;
        tree.nodes[idx].calls += 1;
        Ok(tree.is_attached(idx))
    }

    async fn click(&self, scope: &Scope) -> Result<(), DomError> {
        let mut tree = self.tree.lock();
        let idx = tree.enter(scope)?;
        tree.click_log.push(scope.clone());
        let effect = tree.nodes[idx]
            .clicks
            .pop_front()
            .unwrap_or(ClickEffect::Succeed);
        debug!(node = %scope, effect = ?effect, "click");
        let node = &mut tree.nodes[idx];
        match effect {
            ClickEffect::Succeed => {}
            ClickEffect::Fail(err) => return Err(err),
            ClickEffect::AddClass(class) => node.spec.classes.push(class),
            ClickEffect::SetAttribute(name, value) => {
                node.spec.attributes.insert(name, value);
            }
            ClickEffect::Detach => node.attached = false,
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Compound {
    fn matches(&self, spec: &NodeSpec) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(&spec.tag) {
                return false;
            }
        }
        let classes_match = self
            .classes
            .iter()
            .all(|class| spec.classes.iter().any(|own| own == class));
        let attrs_match = self.attrs.iter().all(|(name, expected)| {
            match (spec.attributes.get(name), expected) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        });
        classes_match && attrs_match
    }
}

struct Matcher(Vec<Compound>);

impl Matcher {
    fn parse(selector: &Selector) -> Result<Self, DomError> {
        match selector {
            Selector::TagName(name) => Ok(Matcher(vec![Compound {
                tag: Some(name.to_ascii_lowercase()),
                ..Default::default()
            }])),
            Selector::Css(expr) => expr
                .split(',')
                .map(parse_compound)
                .collect::<Result<Vec<_>, _>>()
                .map(Matcher),
        }
    }

    fn matches(&self, spec: &NodeSpec) -> bool {
        self.0.iter().any(|compound| compound.matches(spec))
    }
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn parse_compound(raw: &str) -> Result<Compound, DomError> {
    let unsupported = || DomError::Driver(format!("unsupported selector `{}`", raw.trim()));
    let chars: Vec<char> = raw.trim().chars().collect();
    if chars.is_empty() {
        return Err(unsupported());
    }
    let mut pos = 0;
    let mut compound = Compound::default();
    let tag = read_ident(&chars, &mut pos);
    if !tag.is_empty() {
        compound.tag = Some(tag);
    }
    while pos < chars.len() {
        match chars[pos] {
            '.' => {
                pos += 1;
                let class = read_ident(&chars, &mut pos);
                if class.is_empty() {
                    return Err(unsupported());
                }
                compound.classes.push(class);
            }
            '[' => {
                let close = chars[pos..]
                    .iter()
                    .position(|c| *c == ']')
                    .map(|offset| pos + offset)
                    .ok_or_else(unsupported)?;
                let inner: String = chars[pos + 1..close].iter().collect();
                let attr = match inner.split_once('=') {
                    Some((name, value)) => (
                        name.trim().to_string(),
                        Some(value.trim().trim_matches(|c| c == '\'' || c == '"').to_string()),
                    ),
                    None => (inner.trim().to_string(), None),
                };
                compound.attrs.push(attr);
                pos = close + 1;
            }
            _ => return Err(unsupported()),
        }
    }
    Ok(compound)
}
