//! Hand-off of the layout to the preview surface

use tracing::warn;

use crate::model::Layout;

/// Storage the editor writes the layout to and the preview reads it from
pub trait LayoutPersistence: Send + Sync {
    /// Serialize the full layout into the slot
    fn save(&self, layout: &Layout) -> anyhow::Result<()>;

    /// Read the layout back; `Ok(None)` when the slot is empty
    fn load(&self) -> anyhow::Result<Option<Layout>>;
}

/// Load the stored layout, substituting `fallback` when it is absent or unreadable
pub fn load_or_fallback<F>(persistence: &dyn LayoutPersistence, fallback: F) -> Layout
where
    F: FnOnce() -> Layout,
{
    match persistence.load() {
        Ok(Some(layout)) => layout,
        Ok(None) => fallback(),
        Err(e) => {
            warn!("Stored layout is unreadable, using fallback: {:#}", e);
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdAllocator;
    use crate::model::ColumnCount;

    struct Fixed(anyhow::Result<Option<Layout>>);

    impl LayoutPersistence for Fixed {
        fn save(&self, _layout: &Layout) -> anyhow::Result<()> {
            Ok(())
        }

        fn load(&self) -> anyhow::Result<Option<Layout>> {
            match &self.0 {
                Ok(layout) => Ok(layout.clone()),
                Err(e) => Err(anyhow::anyhow!("{}", e)),
            }
        }
    }

    fn one_row() -> Layout {
        Layout::default().add_row(ColumnCount::new(2).unwrap(), &mut IdAllocator::new())
    }

    #[test]
    fn test_stored_layout_wins() {
        let stored = one_row();
        let loaded = load_or_fallback(&Fixed(Ok(Some(stored.clone()))), Layout::default);
        assert_eq!(loaded, stored);
    }

    #[test]
    fn test_fallback_when_absent_or_broken() {
        assert_eq!(load_or_fallback(&Fixed(Ok(None)), one_row), one_row());
        assert_eq!(
            load_or_fallback(&Fixed(Err(anyhow::anyhow!("bad json"))), one_row),
            one_row()
        );
    }
}
