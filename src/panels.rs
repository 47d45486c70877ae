//! One façade per panel of the application, plus [`ColorBook`] which owns all
//! three. Each panel keeps a transient "current" result that only becomes
//! durable through `save_current`.

use tracing::debug;

use crate::collection::{same_hex, same_mix, PersistentCollection};
use crate::error::Result;
use crate::mixer;
use crate::names::NameResolver;
use crate::record::{ColorRecord, RecordId};
use crate::remote::{RemoteColorLookup, Transport};
use crate::storage::KeyValueStore;

/// Storage key for colors found by name.
pub const NAMED_COLORS_KEY: &str = "colors";
/// Storage key for saved mixes.
pub const MIXES_KEY: &str = "colorMixes";
/// Storage key for colors found through the remote service.
pub const API_COLORS_KEY: &str = "apiColors";

/// Inputs the mix panel starts with.
pub const DEFAULT_MIX_INPUTS: (&str, &str) = ("#ff0000", "#0000ff");

pub type Collection<S> = PersistentCollection<ColorRecord, S>;

/// The three saved collections, by panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Names,
    Mixes,
    Api,
}

impl CollectionKind {
    pub fn storage_key(self) -> &'static str {
        match self {
            CollectionKind::Names => NAMED_COLORS_KEY,
            CollectionKind::Mixes => MIXES_KEY,
            CollectionKind::Api => API_COLORS_KEY,
        }
    }
}

/// Manual lookup by color name.
pub struct NamePanel<S> {
    resolver: NameResolver,
    saved: Collection<S>,
    current: Option<ColorRecord>,
}

impl<S: KeyValueStore> NamePanel<S> {
    pub fn new(resolver: NameResolver, store: S) -> Self {
        Self {
            resolver,
            saved: PersistentCollection::open(NAMED_COLORS_KEY, store, same_hex),
            current: None,
        }
    }

    /// Resolve `input` and make it the current result. Blank input is ignored.
    pub fn search(&mut self, input: &str) -> Option<&ColorRecord> {
        let name = input.trim();
        if name.is_empty() {
            return None;
        }
        let record = ColorRecord::new(self.resolver.resolve(name)).with_name(name);
        self.current = Some(record);
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&ColorRecord> {
        self.current.as_ref()
    }

    /// Persist the current result. The current result is cleared once saved;
    /// a duplicate is left in place and reported as `false`.
    pub fn save_current(&mut self) -> Result<bool> {
        let Some(record) = self.current.clone() else {
            return Ok(false);
        };
        let (_, inserted) = self.saved.save(record)?;
        if inserted {
            self.current = None;
        }
        Ok(inserted)
    }

    pub fn discard(&mut self) {
        self.current = None;
    }

    pub fn delete(&mut self, id: RecordId) -> Result<&[ColorRecord]> {
        self.saved.remove(id)
    }

    pub fn list(&self) -> &[ColorRecord] {
        self.saved.list()
    }
}

/// Two-color mixer.
pub struct MixPanel<S> {
    first: String,
    second: String,
    saved: Collection<S>,
    current: Option<ColorRecord>,
}

impl<S: KeyValueStore> MixPanel<S> {
    pub fn new(store: S) -> Self {
        Self {
            first: DEFAULT_MIX_INPUTS.0.to_string(),
            second: DEFAULT_MIX_INPUTS.1.to_string(),
            saved: PersistentCollection::open(MIXES_KEY, store, same_mix),
            current: None,
        }
    }

    pub fn inputs(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }

    /// Replace the inputs as typed. They are validated when mixing.
    pub fn set_inputs(&mut self, first: &str, second: &str) {
        self.first = first.to_string();
        self.second = second.to_string();
    }

    /// Mix the current inputs. On invalid input the previous result is dropped.
    pub fn mix(&mut self) -> Result<&ColorRecord> {
        self.current = None;
        let result = mixer::mix(&self.first, &self.second)?;
        Ok(&*self.current.insert(result.into_record()))
    }

    pub fn current(&self) -> Option<&ColorRecord> {
        self.current.as_ref()
    }

    /// Persist the current mix; `false` when there is none or it is a duplicate.
    pub fn save_current(&mut self) -> Result<bool> {
        match self.current.clone() {
            Some(record) => Ok(self.saved.save(record)?.1),
            None => Ok(false),
        }
    }

    pub fn delete(&mut self, id: RecordId) -> Result<&[ColorRecord]> {
        self.saved.remove(id)
    }

    pub fn list(&self) -> &[ColorRecord] {
        self.saved.list()
    }
}

/// Remote hex lookup.
pub struct ApiPanel<S, T> {
    lookup: RemoteColorLookup<T>,
    saved: Collection<S>,
    current: Option<ColorRecord>,
    error: Option<String>,
}

impl<S: KeyValueStore, T: Transport> ApiPanel<S, T> {
    pub fn new(lookup: RemoteColorLookup<T>, store: S) -> Self {
        Self {
            lookup,
            saved: PersistentCollection::open(API_COLORS_KEY, store, same_hex),
            current: None,
            error: None,
        }
    }

    /// Look `token` up. The previous result and error are cleared first; a
    /// failure is kept as a displayable message as well as returned.
    pub async fn search(&mut self, token: &str) -> Result<&ColorRecord> {
        self.current = None;
        self.error = None;
        match self.lookup.lookup(token).await {
            Ok(record) => {
                debug!(hex = %record.hex, "api panel bound new result");
                Ok(&*self.current.insert(record))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn current(&self) -> Option<&ColorRecord> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Persist the current result; `false` when there is none or its hex is
    /// already saved.
    pub fn save_current(&mut self) -> Result<bool> {
        match self.current.clone() {
            Some(record) => Ok(self.saved.save(record)?.1),
            None => Ok(false),
        }
    }

    pub fn delete(&mut self, id: RecordId) -> Result<&[ColorRecord]> {
        self.saved.remove(id)
    }

    pub fn list(&self) -> &[ColorRecord] {
        self.saved.list()
    }
}

/// All three panels, each bound to its own collection.
pub struct ColorBook<S, T> {
    pub names: NamePanel<S>,
    pub mixes: MixPanel<S>,
    pub api: ApiPanel<S, T>,
}

impl<S: KeyValueStore, T: Transport> ColorBook<S, T> {
    pub fn new(
        resolver: NameResolver,
        lookup: RemoteColorLookup<T>,
        names_store: S,
        mixes_store: S,
        api_store: S,
    ) -> Self {
        Self {
            names: NamePanel::new(resolver, names_store),
            mixes: MixPanel::new(mixes_store),
            api: ApiPanel::new(lookup, api_store),
        }
    }

    /// Give each collection its own handle onto the same backing store.
    pub fn with_store(resolver: NameResolver, lookup: RemoteColorLookup<T>, store: S) -> Self
    where
        S: Clone,
    {
        Self::new(resolver, lookup, store.clone(), store.clone(), store)
    }

    pub fn list(&self, kind: CollectionKind) -> &[ColorRecord] {
        match kind {
            CollectionKind::Names => self.names.list(),
            CollectionKind::Mixes => self.mixes.list(),
            CollectionKind::Api => self.api.list(),
        }
    }

    pub fn delete(&mut self, kind: CollectionKind, id: RecordId) -> Result<&[ColorRecord]> {
        match kind {
            CollectionKind::Names => self.names.delete(id),
            CollectionKind::Mixes => self.mixes.delete(id),
            CollectionKind::Api => self.api.delete(id),
        }
    }
}
