use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::color::normalize;
use crate::error::{ColorError, Result};
use crate::record::{observe_id, ColorRecord, RecordId};
use crate::storage::KeyValueStore;

/// Anything a collection can store: it must carry a stable identity.
pub trait Identified: Sized {
    fn id(&self) -> RecordId;

    /// Bring the item into the form it is stored in, or fail if it has none.
    fn canonical(self) -> Result<Self> {
        Ok(self)
    }
}

impl Identified for ColorRecord {
    fn id(&self) -> RecordId {
        self.id
    }

    fn canonical(mut self) -> Result<Self> {
        self.hex = normalize(&self.hex)?;
        Ok(self)
    }
}

/// Decides whether `candidate` duplicates an `existing` member.
pub type Dedupe<T> = fn(candidate: &T, existing: &T) -> bool;

/// Records with the same canonical hex are duplicates.
pub fn same_hex(candidate: &ColorRecord, existing: &ColorRecord) -> bool {
    candidate.hex == existing.hex
}

/// Mixes are duplicates when both the result and the inputs match.
pub fn same_mix(candidate: &ColorRecord, existing: &ColorRecord) -> bool {
    candidate.hex == existing.hex && candidate.source_inputs == existing.source_inputs
}

/// A named, ordered, deduplicated list of records, written through to a
/// [`KeyValueStore`] on every mutation.
///
/// The in-memory sequence is only replaced after the store accepted the new
/// value, so a failed write leaves the collection as it was.
pub struct PersistentCollection<T, S> {
    key: String,
    store: S,
    dedupe: Dedupe<T>,
    items: Vec<T>,
}

impl<T, S> PersistentCollection<T, S>
where
    T: Identified + Serialize + DeserializeOwned + Clone,
    S: KeyValueStore,
{
    /// Bind to `key` in `store` and hydrate from whatever is stored there.
    pub fn open(key: impl Into<String>, store: S, dedupe: Dedupe<T>) -> Self {
        let mut collection = Self {
            key: key.into(),
            store,
            dedupe,
            items: Vec::new(),
        };
        collection.items = collection.load();
        collection
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored sequence. A missing key, an unreadable store or an
    /// undecodable value all yield an empty sequence.
    pub fn load(&self) -> Vec<T> {
        match self.read() {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    key = %self.key,
                    store = self.store.name(),
                    error = %e,
                    "discarding stored collection"
                );
                Vec::new()
            }
        }
    }

    /// Decode the stored sequence. Members without a canonical form and
    /// duplicates of earlier members are dropped.
    fn read(&self) -> Result<Vec<T>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let decoded: Vec<T> =
            serde_json::from_str(&raw).map_err(|source| ColorError::StorageDecode {
                key: self.key.clone(),
                source,
            })?;

        let mut items: Vec<T> = Vec::with_capacity(decoded.len());
        for item in decoded {
            let id = item.id();
            observe_id(id);
            match item.canonical() {
                Ok(item) if !items.iter().any(|kept| (self.dedupe)(&item, kept)) => {
                    items.push(item)
                }
                Ok(_) => debug!(key = %self.key, id, "dropping duplicate stored record"),
                Err(e) => warn!(key = %self.key, id, error = %e, "dropping stored record"),
            }
        }
        Ok(items)
    }

    fn persist(&mut self, items: &[T]) -> Result<()> {
        let encoded = serde_json::to_string(items).map_err(std::io::Error::other)?;
        self.store.set(&self.key, &encoded)
    }

    /// Re-hydrate from the store, dropping in-memory state.
    pub fn reload(&mut self) {
        self.items = self.load();
    }

    /// Current sequence in insertion order.
    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `record` unless it duplicates a member. Returns the sequence
    /// and whether anything was inserted; a duplicate touches nothing.
    ///
    /// The record is canonicalized first; one without a canonical form is
    /// rejected before the store is touched.
    pub fn save(&mut self, record: T) -> Result<(&[T], bool)> {
        let record = record.canonical()?;
        if self.items.iter().any(|existing| (self.dedupe)(&record, existing)) {
            return Ok((self.items.as_slice(), false));
        }
        let id = record.id();
        let mut next = self.items.clone();
        next.push(record);
        self.persist(&next)?;
        self.items = next;
        info!(key = %self.key, id, total = self.items.len(), "saved record");
        Ok((self.items.as_slice(), true))
    }

    /// Drop the first member with `id`, if any, and persist the result either
    /// way.
    pub fn remove(&mut self, id: RecordId) -> Result<&[T]> {
        let mut next = self.items.clone();
        let removed = match next.iter().position(|item| item.id() == id) {
            Some(index) => {
                next.remove(index);
                true
            }
            None => false,
        };
        self.persist(&next)?;
        self.items = next;
        info!(key = %self.key, id, removed, "removed record");
        Ok(self.items.as_slice())
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};

    const KEY: &str = "colors";

    type Records<S> = PersistentCollection<ColorRecord, S>;

    fn record(id: RecordId, hex: &str) -> ColorRecord {
        let mut record = ColorRecord::new(hex);
        record.id = id;
        record
    }

    fn empty() -> PersistentCollection<ColorRecord, MemoryStore> {
        PersistentCollection::open(KEY, MemoryStore::new(), same_hex)
    }

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn name(&self) -> &str {
            "read-only"
        }

        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn starts_empty_without_stored_value() {
        assert!(empty().is_empty());
    }

    #[test]
    fn duplicate_hex_is_a_silent_no_op() {
        let mut colors = empty();

        let (items, inserted) = colors.save(record(1, "#ff0000")).unwrap();
        assert!(inserted);
        assert_eq!(items.len(), 1);

        let (items, inserted) = colors.save(record(2, "#ff0000")).unwrap();
        assert!(!inserted);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }

    #[test]
    fn save_appends_in_insertion_order() {
        let mut colors = empty();
        for (id, hex) in [(3, "#000003"), (1, "#000001"), (2, "#000002")] {
            colors.save(record(id, hex)).unwrap();
        }
        let ids: Vec<RecordId> = colors.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut colors = empty();
        for (id, hex) in [(1, "#000001"), (2, "#000002"), (3, "#000003")] {
            colors.save(record(id, hex)).unwrap();
        }
        let items = colors.remove(2).unwrap();
        let ids: Vec<RecordId> = items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let mut colors = empty();
        colors.save(record(1, "#000001")).unwrap();
        let before = colors.list().to_vec();

        let after = colors.remove(999).unwrap().to_vec();

        assert_eq!(before, after);
        let store = colors.into_store();
        assert!(store.get(KEY).unwrap().is_some());
    }

    #[test]
    fn mutations_write_through() {
        let mut colors = empty();
        colors.save(record(1, "#ff0000")).unwrap();
        colors.save(record(2, "#00ff00")).unwrap();
        colors.remove(1).unwrap();

        let reopened = Records::open(KEY, colors.into_store(), same_hex);
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.list()[0].hex, "#00ff00");
    }

    #[test]
    fn invalid_stored_json_loads_empty() {
        let store = MemoryStore::seeded(KEY, "{not json");
        let colors = Records::open(KEY, store, same_hex);
        assert!(colors.is_empty());
        assert!(colors.load().is_empty());
    }

    #[test]
    fn wrong_shape_loads_empty() {
        for raw in ["null", "{}", r#"[{"id":"x"}]"#, "42"] {
            let store = MemoryStore::seeded(KEY, raw);
            let colors = Records::open(KEY, store, same_hex);
            assert!(colors.is_empty(), "expected empty for {raw}");
        }
    }

    #[test]
    fn decode_failure_is_reported_by_read() {
        let store = MemoryStore::seeded(KEY, "garbage");
        let colors = Records::open(KEY, store, same_hex);
        assert!(matches!(
            colors.read(),
            Err(ColorError::StorageDecode { key, .. }) if key == KEY
        ));
    }

    #[test]
    fn save_after_corrupt_load_overwrites_store() {
        let store = MemoryStore::seeded(KEY, "garbage");
        let mut colors = Records::open(KEY, store, same_hex);
        colors.save(record(1, "#123456")).unwrap();
        colors.reload();
        assert_eq!(colors.len(), 1);
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let mut colors = Records::open(KEY, ReadOnlyStore, same_hex);
        assert!(matches!(
            colors.save(record(1, "#ff0000")),
            Err(ColorError::Storage(_))
        ));
        assert!(colors.is_empty());
    }

    #[test]
    fn hex_spellings_of_one_color_are_duplicates() {
        let mut colors = empty();

        let (items, inserted) = colors.save(record(1, "FF0000")).unwrap();
        assert!(inserted);
        assert_eq!(items[0].hex, "#ff0000");

        let (items, inserted) = colors.save(record(2, "#ff0000")).unwrap();
        assert!(!inserted);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn non_hex_record_is_rejected_before_writing() {
        let mut colors = empty();
        assert!(matches!(
            colors.save(record(1, "zzz")),
            Err(ColorError::InvalidColorFormat(_))
        ));
        assert!(colors.is_empty());
        assert!(colors.into_store().get(KEY).unwrap().is_none());
    }

    #[test]
    fn load_canonicalizes_and_drops_unusable_members() {
        let store = MemoryStore::seeded(
            KEY,
            r##"[{"id":1,"hex":"#FF0000"},{"id":2,"hex":"zzz"},{"id":3,"hex":"ff0000"},{"id":4,"hex":"00ff00"}]"##,
        );
        let mut colors = Records::open(KEY, store, same_hex);

        let hexes: Vec<&str> = colors.list().iter().map(|r| r.hex.as_str()).collect();
        assert_eq!(hexes, vec!["#ff0000", "#00ff00"]);
        assert!(!colors.save(record(5, "#ff0000")).unwrap().1);
    }

    #[test]
    fn remove_drops_a_single_member() {
        let store = MemoryStore::seeded(
            KEY,
            r##"[{"id":5,"hex":"#ff0000"},{"id":5,"hex":"#00ff00"}]"##,
        );
        let mut colors = Records::open(KEY, store, same_hex);

        let items = colors.remove(5).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].hex, "#00ff00");
    }

    #[test]
    fn new_ids_follow_loaded_ones() {
        let ahead = crate::record::next_id() + 1_000_000;
        let store = MemoryStore::seeded(KEY, &format!(r##"[{{"id":{ahead},"hex":"#ff0000"}}]"##));
        let _colors = Records::open(KEY, store, same_hex);

        assert!(ColorRecord::new("#00ff00").id > ahead);
    }

    #[test]
    fn mix_dedupe_considers_inputs() {
        let mut mixes = Records::open("colorMixes", MemoryStore::new(), same_mix);
        let mut a = record(1, "#800080");
        a.source_inputs = vec!["#ff0000".into(), "#0000ff".into()];
        let mut b = record(2, "#800080");
        b.source_inputs = vec!["#ff0000".into(), "#0000ff".into()];
        let mut c = record(3, "#800080");
        c.source_inputs = vec!["#800080".into(), "#800080".into()];

        assert!(mixes.save(a).unwrap().1);
        assert!(!mixes.save(b).unwrap().1);
        assert!(mixes.save(c).unwrap().1);
        assert_eq!(mixes.len(), 2);
    }

    #[test]
    fn separate_keys_never_share_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut names = Records::open("colors", FileStore::new(dir.path()), same_hex);
        let api = Records::open(
            "apiColors",
            FileStore::new(dir.path()),
            same_hex,
        );
        names.save(record(1, "#ff0000")).unwrap();
        assert_eq!(names.len(), 1);
        assert!(api.load().is_empty());
    }

    #[test]
    fn reload_from_disk_restores_records() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut colors = Records::open(KEY, FileStore::new(dir.path()), same_hex);
            colors.save(record(1, "#ff0000").with_name("rojo")).unwrap();
        }
        let colors = Records::open(KEY, FileStore::new(dir.path()), same_hex);
        assert_eq!(colors.len(), 1);
        assert_eq!(colors.get(1).and_then(|r| r.name.as_deref()), Some("rojo"));
    }
}
