//! Parsed table of contents tree.

/// Processing instruction attached to an element, e.g. `<?dbhtml filename="a.html"?>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instruction {
    /// Instruction target (`dbhtml`).
    pub target: String,
    /// Everything after the target, trimmed (`filename="a.html"`).
    pub content: String,
}

impl Instruction {
    /// Create an instruction from its target and content.
    #[must_use]
    pub fn new(target: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            content: content.into(),
        }
    }
}

/// Element of the table of contents document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocNode {
    /// Local element name, without namespace prefix.
    pub tag: String,
    /// Child elements in document order.
    pub children: Vec<TocNode>,
    /// Processing instructions that are direct children of this element.
    pub instructions: Vec<Instruction>,
}

impl TocNode {
    /// Create a new node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TocNode>) -> Self {
        self.children = children;
        self
    }

    /// Add a processing instruction.
    #[must_use]
    pub fn with_instruction(mut self, target: &str, content: &str) -> Self {
        self.instructions.push(Instruction::new(target, content));
        self
    }
}

