/// What the core needs from the game page, independent of the real DOM

/// Structural marker class for a board piece
pub const INSTANCE_CLASS: &str = "instance";
/// Decorative sub-marker every real board piece carries
pub const INSTANCE_EMOJI_SELECTOR: &str = ".instance-emoji";
pub const INSTANCE_SELECTOR: &str = ".instance";
pub const ITEM_CLASS: &str = "item";
pub const ITEM_SELECTOR: &str = ".item";
pub const ITEM_WRAPPER_CLASS: &str = "item-wrapper";
/// Main content container observed for insertions
pub const CONTAINER_SELECTOR: &str = ".infinite-craft";
/// Panel the refresh button is prepended into
pub const SIDE_CONTROLS_SELECTOR: &str = ".side-controls";

/// A live node owned by the host page. We only read text and write color.
pub trait PageNode: Sized {
    fn is_element(&self) -> bool;

    fn has_class(&self, class: &str) -> bool;

    /// True if some descendant matches `selector`
    fn has_descendant(&self, selector: &str) -> bool;

    fn first_element_child(&self) -> Option<Self>;

    /// Text content of the second child node (the element name).
    /// Empty text counts as missing.
    fn label_text(&self) -> Option<String>;

    /// Set the foreground color style of this node only
    fn set_text_color(&self, css_color: &str);
}

/// Lookup capabilities the host page exposes
pub trait HostPage {
    type Node: PageNode;

    /// Resolve an inserted node to the live instance handle it belongs to
    fn find_instance(&self, node: &Self::Node) -> Option<Self::Node>;

    /// All nodes currently on the page matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory page used by the unit tests
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Debug)]
    struct NodeData {
        element: bool,
        classes: Vec<String>,
        children: Vec<FakeNode>,
        label: Option<String>,
        color: RefCell<Option<String>>,
        color_writes: Cell<usize>,
    }

    #[derive(Debug, Clone)]
    pub struct FakeNode(Rc<NodeData>);

    impl PartialEq for FakeNode {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }
    }

    impl FakeNode {
        fn build(element: bool, classes: &[&str], label: Option<&str>, children: Vec<FakeNode>) -> FakeNode {
            FakeNode(Rc::new(NodeData {
                element,
                classes: classes.iter().map(|c| c.to_string()).collect(),
                children,
                label: label.map(str::to_string),
                color: RefCell::new(None),
                color_writes: Cell::new(0),
            }))
        }

        pub fn text() -> FakeNode {
            FakeNode::build(false, &[], None, Vec::new())
        }

        pub fn element(classes: &[&str], label: Option<&str>, children: Vec<FakeNode>) -> FakeNode {
            FakeNode::build(true, classes, label, children)
        }

        /// `<div class="instance"><span class="instance-emoji"/>label</div>`
        pub fn instance(label: &str) -> FakeNode {
            FakeNode::element(&["instance"], Some(label), vec![FakeNode::element(&["instance-emoji"], None, Vec::new())])
        }

        /// `<div class="item">` with its label
        pub fn item(label: Option<&str>) -> FakeNode {
            FakeNode::element(&["item"], label, Vec::new())
        }

        pub fn item_wrapper(item: FakeNode) -> FakeNode {
            FakeNode::element(&["item-wrapper"], None, vec![item])
        }

        pub fn color(&self) -> Option<String> {
            self.0.color.borrow().clone()
        }

        pub fn color_writes(&self) -> usize {
            self.0.color_writes.get()
        }

        fn collect(&self, class: &str, out: &mut Vec<FakeNode>) {
            if self.has_class(class) {
                out.push(self.clone());
            }
            for child in &self.0.children {
                child.collect(class, out);
            }
        }
    }

    impl PageNode for FakeNode {
        fn is_element(&self) -> bool {
            self.0.element
        }

        fn has_class(&self, class: &str) -> bool {
            self.0.classes.iter().any(|c| c == class)
        }

        fn has_descendant(&self, selector: &str) -> bool {
            let class = selector.trim_start_matches('.');
            self.0.children.iter().any(|child| child.has_class(class) || child.has_descendant(selector))
        }

        fn first_element_child(&self) -> Option<FakeNode> {
            self.0.children.iter().find(|child| child.is_element()).cloned()
        }

        fn label_text(&self) -> Option<String> {
            self.0.label.clone().filter(|label| !label.is_empty())
        }

        fn set_text_color(&self, css_color: &str) {
            *self.0.color.borrow_mut() = Some(css_color.to_string());
            self.0.color_writes.set(self.0.color_writes.get() + 1);
        }
    }

    /// Page with a fixed set of root nodes and a registry of live instances
    #[derive(Debug, Default)]
    pub struct FakePage {
        pub roots: Vec<FakeNode>,
        pub instances: Vec<FakeNode>,
    }

    impl HostPage for FakePage {
        type Node = FakeNode;

        fn find_instance(&self, node: &FakeNode) -> Option<FakeNode> {
            self.instances.iter().find(|instance| *instance == node).cloned()
        }

        fn query_all(&self, selector: &str) -> Vec<FakeNode> {
            let class = selector.trim_start_matches('.');
            let mut out = Vec::new();
            for root in &self.roots {
                root.collect(class, &mut out);
            }
            out
        }
    }
}
