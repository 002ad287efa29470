/// Recolor elements as the game inserts them into the page
use log::{debug, warn};

use crate::classifier::{Classifier, DisplayColor};
use crate::error::{Error, Result};
use crate::host::{
    HostPage, PageNode, INSTANCE_CLASS, INSTANCE_EMOJI_SELECTOR, INSTANCE_SELECTOR, ITEM_CLASS, ITEM_SELECTOR,
    ITEM_WRAPPER_CLASS,
};
use crate::painter::Painter;

/// Outcome of one mutation batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Nodes that were classified and handed to the painter
    pub painted: usize,
    /// Nodes that are not board pieces or palette items
    pub skipped: usize,
    /// Per-node failures, by position in the batch
    pub failures: Vec<(usize, Error)>,
}

/// Drives classifier → painter for inserted nodes
pub struct MutationWatcher<H: HostPage, P> {
    classifier: Classifier,
    painter: P,
    page: H,
}

impl<H, P> MutationWatcher<H, P>
where
    H: HostPage,
    P: Painter<H::Node>,
{
    pub fn new(classifier: Classifier, painter: P, page: H) -> Self {
        MutationWatcher {
            classifier,
            painter,
            page,
        }
    }

    /// Handle every added node of a batch in delivery order.
    ///
    /// A node that fails is recorded and logged; the rest of the batch
    /// is still processed.
    pub fn handle_batch<I>(&self, nodes: I) -> BatchReport
    where
        I: IntoIterator<Item = H::Node>,
    {
        let mut report = BatchReport::default();

        for (index, node) in nodes.into_iter().enumerate() {
            match self.handle_node(&node) {
                Ok(Some(_)) => report.painted += 1,
                Ok(None) => report.skipped += 1,
                Err(e) => {
                    warn!("Could not color inserted node #{}: {}", index, e);
                    report.failures.push((index, e));
                }
            }
        }

        debug!(
            "Mutation batch: {} painted, {} skipped, {} failed",
            report.painted,
            report.skipped,
            report.failures.len()
        );
        report
    }

    /// Recolor one inserted node if it is a board instance or a palette item.
    ///
    /// Returns `Ok(None)` when the node is not something we color.
    pub fn handle_node(&self, node: &H::Node) -> Result<Option<DisplayColor>> {
        if !node.is_element() {
            return Ok(None);
        }

        if node.has_class(INSTANCE_CLASS) && node.has_descendant(INSTANCE_EMOJI_SELECTOR) {
            return match self.page.find_instance(node) {
                Some(instance) => self.recolor(&instance).map(Some),
                None => Ok(None),
            };
        }

        if node.has_class(ITEM_WRAPPER_CLASS) && node.has_descendant(ITEM_SELECTOR) {
            return match node.first_element_child().filter(|child| child.has_class(ITEM_CLASS)) {
                Some(item) => self.recolor(&item).map(Some),
                None => Ok(None),
            };
        }

        Ok(None)
    }

    /// Classify a node by its label and paint it
    pub fn recolor(&self, node: &H::Node) -> Result<DisplayColor> {
        let text = node.label_text().ok_or(Error::MissingLabel)?;
        let color = self.classifier.classify(&text);
        self.painter.paint(node, color);
        Ok(color)
    }

    /// Recolor every instance and item currently on the page.
    ///
    /// Every element is attempted; the first failure is returned after the
    /// sweep, otherwise the number of elements visited.
    pub fn repaint_all(&self) -> Result<usize> {
        let mut visited = 0;
        let mut first_error = None;

        for selector in [INSTANCE_SELECTOR, ITEM_SELECTOR] {
            for node in self.page.query_all(selector) {
                visited += 1;
                if let Err(e) = self.recolor(&node) {
                    warn!("Could not repaint {} element: {}", selector, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(visited),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::{FakeNode, FakePage};
    use crate::painter::StylePainter;
    use crate::store::ClassificationStore;

    const GREEN: &str = "#00cc1f";
    const RED: &str = "#ff1c1c";

    fn watcher(page: FakePage) -> MutationWatcher<FakePage, StylePainter> {
        let store = ClassificationStore::from_lists(&["fire", "water"], &["bigbang"]).shared();
        MutationWatcher::new(Classifier::new(store), StylePainter::default(), page)
    }

    #[test]
    fn test_registered_instance_is_painted() {
        let fire = FakeNode::instance("Fire");
        let watcher = watcher(FakePage {
            roots: vec![fire.clone()],
            instances: vec![fire.clone()],
        });

        let report = watcher.handle_batch(vec![fire.clone()]);

        assert_eq!(report.painted, 1);
        assert!(report.failures.is_empty());
        assert_eq!(fire.color().as_deref(), Some(GREEN));
    }

    #[test]
    fn test_unregistered_instance_is_skipped() {
        let fire = FakeNode::instance("Fire");
        let watcher = watcher(FakePage::default());

        let report = watcher.handle_batch(vec![fire.clone()]);

        assert_eq!(report.skipped, 1);
        assert_eq!(fire.color(), None);
    }

    #[test]
    fn test_instance_without_emoji_marker_is_skipped() {
        let bare = FakeNode::element(&["instance"], Some("Fire"), Vec::new());
        let watcher = watcher(FakePage {
            roots: vec![bare.clone()],
            instances: vec![bare.clone()],
        });

        assert!(watcher.handle_node(&bare).unwrap().is_none());
        assert_eq!(bare.color(), None);
    }

    #[test]
    fn test_item_wrapper_paints_its_first_item() {
        let item = FakeNode::item(Some("BigBang"));
        let wrapper = FakeNode::item_wrapper(item.clone());
        let watcher = watcher(FakePage::default());

        let color = watcher.handle_node(&wrapper).unwrap();

        assert_eq!(color, Some(DisplayColor::Disproven));
        assert_eq!(item.color().as_deref(), Some(RED));
        assert_eq!(wrapper.color(), None);
    }

    #[test]
    fn test_item_wrapper_with_item_not_first_is_skipped() {
        let item = FakeNode::item(Some("Fire"));
        let wrapper = FakeNode::element(
            &["item-wrapper"],
            None,
            vec![FakeNode::element(&["badge"], None, Vec::new()), item.clone()],
        );
        let watcher = watcher(FakePage::default());

        assert!(watcher.handle_node(&wrapper).unwrap().is_none());
        assert_eq!(item.color(), None);
    }

    #[test]
    fn test_non_elements_and_other_nodes_are_skipped() {
        let watcher = watcher(FakePage::default());

        let report = watcher.handle_batch(vec![
            FakeNode::text(),
            FakeNode::element(&["sidebar"], Some("Fire"), Vec::new()),
        ]);

        assert_eq!(report.skipped, 2);
        assert_eq!(report.painted, 0);
    }

    #[test]
    fn test_unknown_label_keeps_native_color() {
        let item = FakeNode::item(Some("Wind"));
        let watcher = watcher(FakePage::default());

        let color = watcher.handle_node(&FakeNode::item_wrapper(item.clone())).unwrap();

        assert_eq!(color, Some(DisplayColor::NoOverride));
        assert_eq!(item.color_writes(), 0);
    }

    #[test]
    fn test_malformed_node_does_not_abort_batch() {
        let broken = FakeNode::item_wrapper(FakeNode::item(None));
        let empty = FakeNode::item_wrapper(FakeNode::item(Some("")));
        let good_item = FakeNode::item(Some("Water"));
        let good = FakeNode::item_wrapper(good_item.clone());
        let watcher = watcher(FakePage::default());

        let report = watcher.handle_batch(vec![broken, empty, good]);

        assert_eq!(report.painted, 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].0, 0);
        assert!(matches!(report.failures[1].1, Error::MissingLabel));
        assert_eq!(good_item.color().as_deref(), Some(GREEN));
    }

    #[test]
    fn test_batch_uses_current_store_contents() {
        let store = ClassificationStore::new().shared();
        let watcher = MutationWatcher::new(Classifier::new(store.clone()), StylePainter::default(), FakePage::default());
        let first = FakeNode::item(Some("Steam"));
        let second = FakeNode::item(Some("Steam"));

        watcher.handle_batch(vec![FakeNode::item_wrapper(first.clone())]);
        store.borrow_mut().replace(&["steam"], &[]);
        watcher.handle_batch(vec![FakeNode::item_wrapper(second.clone())]);

        assert_eq!(first.color(), None);
        assert_eq!(second.color().as_deref(), Some(GREEN));
    }

    #[test]
    fn test_repaint_all_visits_instances_and_items() {
        let fire = FakeNode::instance("Fire");
        let item = FakeNode::item(Some("BigBang"));
        let watcher = watcher(FakePage {
            roots: vec![fire.clone(), FakeNode::item_wrapper(item.clone())],
            instances: Vec::new(),
        });

        assert_eq!(watcher.repaint_all().unwrap(), 2);
        assert_eq!(fire.color().as_deref(), Some(GREEN));
        assert_eq!(item.color().as_deref(), Some(RED));
    }

    #[test]
    fn test_repaint_all_reports_failure_after_full_sweep() {
        let broken = FakeNode::item(None);
        let water = FakeNode::item(Some("Water"));
        let watcher = watcher(FakePage {
            roots: vec![broken, water.clone()],
            instances: Vec::new(),
        });

        assert!(matches!(watcher.repaint_all(), Err(Error::MissingLabel)));
        assert_eq!(water.color().as_deref(), Some(GREEN));
    }
}
