//! Holder for the chart mounted by the latest render cycle

/// Owns the mount handle of the current chart; dropping the handle unmounts it
#[derive(Debug)]
pub struct ChartSlot<H> {
    current: Option<H>,
}

impl<H> ChartSlot<H> {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Unmount the current chart, then mount the next one.
    ///
    /// `mount` runs only after the previous handle is dropped, so two charts
    /// never share the page. Returns whether a chart is mounted afterwards.
    pub fn replace(&mut self, mount: impl FnOnce() -> Option<H>) -> bool {
        drop(self.current.take());
        self.current = mount();
        self.current.is_some()
    }
}

impl<H> Default for ChartSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Stand-in for a mounted view: records its own unmount
    struct Mounted {
        id: u32,
        page: Rc<RefCell<Vec<u32>>>,
    }

    impl Mounted {
        fn new(id: u32, page: &Rc<RefCell<Vec<u32>>>) -> Self {
            page.borrow_mut().push(id);
            Self {
                id,
                page: Rc::clone(page),
            }
        }
    }

    impl Drop for Mounted {
        fn drop(&mut self) {
            self.page.borrow_mut().retain(|id| *id != self.id);
        }
    }

    #[test]
    fn test_each_cycle_replaces_the_previous_chart() {
        let page = Rc::new(RefCell::new(Vec::new()));
        let mut slot = ChartSlot::new();

        for cycle in 1..=3 {
            assert!(slot.replace(|| {
                // Previous chart is already gone when the next one mounts
                assert!(page.borrow().is_empty());
                Some(Mounted::new(cycle, &page))
            }));
            assert_eq!(*page.borrow(), vec![cycle]);
        }
    }

    #[test]
    fn test_failed_mount_leaves_page_empty() {
        let page = Rc::new(RefCell::new(Vec::new()));
        let mut slot = ChartSlot::new();

        slot.replace(|| Some(Mounted::new(1, &page)));
        assert!(!slot.replace(|| None));
        assert!(page.borrow().is_empty());
    }
}
