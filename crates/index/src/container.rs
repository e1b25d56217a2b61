//! MultiIndex: the read facade over one store and one identity cache
//!
//! A `MultiIndex` binds a `ColumnStore`, a column-space layout, a codec and
//! an identity cache. Views on individual indices (`IndexView`) and every
//! cursor they produce share this context through an `Arc`.

use std::sync::Arc;

use tracing::info;

use mira_concurrency::IdentityCache;
use mira_core::{BincodeCodec, Error, IndexSpec, ReadMode, Record, RecordCodec, Result};
use mira_storage::{ColumnStore, ReadView};

use crate::config::IndexConfig;
use crate::layout::Layout;
use crate::view::IndexView;

/// State shared by a container, its views and their cursors
pub(crate) struct Context<R: Record, C: RecordCodec> {
    pub(crate) store: Arc<ColumnStore>,
    pub(crate) cache: Arc<IdentityCache<R>>,
    pub(crate) layout: Layout,
    pub(crate) read_mode: ReadMode,
    pub(crate) codec: C,
}

impl<R: Record, C: RecordCodec> Context<R, C> {
    /// Fresh read view in the configured mode
    pub(crate) fn read_view(&self) -> ReadView {
        self.store.read_view(self.read_mode)
    }
}

/// Ordered multi-index access to records of type `R`
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(ColumnStore::new(2));
/// let people = MultiIndex::<Person>::open(store, IndexConfig::new(["by_id", "by_name"]))?;
///
/// let by_name = people.index::<ByName>()?;
/// let mut cursor = by_name.lower_bound("B")?;
/// while cursor.valid() {
///     println!("{}", cursor.get().name);
///     cursor.advance();
/// }
/// ```
pub struct MultiIndex<R: Record, C: RecordCodec = BincodeCodec> {
    context: Arc<Context<R, C>>,
}

impl<R: Record> MultiIndex<R> {
    /// Open with the default codec and a new identity cache
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate and
    /// `ColumnSpaceOutOfRange` if the layout names more column spaces than
    /// the store has.
    pub fn open(store: Arc<ColumnStore>, config: IndexConfig) -> Result<Self> {
        Self::with_codec(store, config, BincodeCodec)
    }
}

impl<R: Record, C: RecordCodec> MultiIndex<R, C> {
    /// Open with a custom codec and a new identity cache
    pub fn with_codec(store: Arc<ColumnStore>, config: IndexConfig, codec: C) -> Result<Self> {
        let cache = Arc::new(IdentityCache::with_config(config.cache));
        Self::from_parts(store, config, codec, cache)
    }

    /// Open sharing an existing identity cache
    ///
    /// Containers that share a cache over the same store hand out the same
    /// record instances.
    pub fn from_parts(
        store: Arc<ColumnStore>,
        config: IndexConfig,
        codec: C,
        cache: Arc<IdentityCache<R>>,
    ) -> Result<Self> {
        let layout = Layout::from_config(&config)?;
        let available = store.column_spaces();
        if layout.len() > available {
            return Err(Error::ColumnSpaceOutOfRange {
                index: layout.len() - 1,
                count: available,
            });
        }

        info!(
            target: "mira::index",
            indices = layout.len(),
            primary = %layout.primary(),
            read_mode = %config.read_mode,
            codec = codec.codec_id(),
            "Opened multi-index"
        );

        Ok(Self {
            context: Arc::new(Context {
                store,
                cache,
                layout,
                read_mode: config.read_mode,
                codec,
            }),
        })
    }

    /// View on the index described by `I`
    ///
    /// # Errors
    ///
    /// Returns `UnknownIndex` if `I::NAME` is not part of the layout.
    pub fn index<I: IndexSpec<R>>(&self) -> Result<IndexView<R, I, C>> {
        let space = self.context.layout.space_of(I::NAME)?;
        Ok(IndexView::new(Arc::clone(&self.context), space))
    }

    /// Column-space layout
    pub fn layout(&self) -> &Layout {
        &self.context.layout
    }

    /// Identity cache shared by every cursor of this container
    pub fn cache(&self) -> &Arc<IdentityCache<R>> {
        &self.context.cache
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<ColumnStore> {
        &self.context.store
    }

    /// Read mode cursors are opened with
    pub fn read_mode(&self) -> ReadMode {
        self.context.read_mode
    }

    /// Codec used for keys and records
    pub fn codec(&self) -> &C {
        &self.context.codec
    }
}

impl<R: Record, C: RecordCodec> Clone for MultiIndex<R, C> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
        }
    }
}
