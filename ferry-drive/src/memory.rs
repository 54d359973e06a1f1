use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{ContentRange, DriveError, DriveResult, DriveSession, ObjectId};

/// In-memory [`DriveSession`] for tests and local development.
///
/// Records every create and append so callers can assert on the exact
/// sequence of ranges the driver produced. Appends can be scripted to fail at
/// a given index, and creation can be scripted to fail outright.
#[derive(Default)]
pub struct MemoryDriveSession {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    objects: HashMap<ObjectId, StoredObject>,
    created_order: Vec<ObjectId>,
    append_count: usize,
    fail_append_at: Option<usize>,
    fail_create: bool,
}

/// One object as the fake remote sees it
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub name: String,
    pub parent_id: String,
    pub mime_type: String,
    /// `[start, end)` per confirmed append, in arrival order
    pub ranges: Vec<(u64, u64)>,
    /// Wire descriptor per confirmed append
    pub descriptors: Vec<String>,
    pub data: Vec<u8>,
}

impl MemoryDriveSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `index`-th append (0-based, counted across all objects) with
    /// a scripted transport error
    pub fn fail_append_at(mut self, index: usize) -> Self {
        self.inner.get_mut().fail_append_at = Some(index);
        self
    }

    /// Fail every object creation with a scripted transport error
    pub fn fail_create(mut self) -> Self {
        self.inner.get_mut().fail_create = true;
        self
    }

    /// Snapshot of a stored object, if it exists
    pub async fn object(&self, id: &ObjectId) -> Option<StoredObject> {
        self.inner.lock().await.objects.get(id).cloned()
    }

    /// Number of objects created so far
    pub async fn object_count(&self) -> usize {
        self.inner.lock().await.created_order.len()
    }

    /// Ids in creation order
    pub async fn created_ids(&self) -> Vec<ObjectId> {
        self.inner.lock().await.created_order.clone()
    }
}

fn scripted(message: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message.to_string())
}

#[async_trait]
impl DriveSession for MemoryDriveSession {
    async fn create_object(
        &self,
        name: &str,
        parent_id: &str,
        mime_type: &str,
    ) -> DriveResult<ObjectId> {
        let mut inner = self.inner.lock().await;
        if inner.fail_create {
            return Err(DriveError::create_object(
                name,
                scripted("scripted create failure"),
            ));
        }

        let id = ObjectId::from_string(format!("obj_{}", Uuid::new_v4().simple()));
        inner.objects.insert(
            id.clone(),
            StoredObject {
                name: name.to_string(),
                parent_id: parent_id.to_string(),
                mime_type: mime_type.to_string(),
                ranges: Vec::new(),
                descriptors: Vec::new(),
                data: Vec::new(),
            },
        );
        inner.created_order.push(id.clone());
        Ok(id)
    }

    async fn append_range(
        &self,
        id: &ObjectId,
        _parent_id: &str,
        data: Bytes,
        range: ContentRange,
    ) -> DriveResult<()> {
        let mut inner = self.inner.lock().await;

        let index = inner.append_count;
        inner.append_count += 1;
        if inner.fail_append_at == Some(index) {
            return Err(DriveError::append_range(
                range,
                scripted("scripted append failure"),
            ));
        }

        let object = inner
            .objects
            .get_mut(id)
            .ok_or_else(|| DriveError::backend(scripted("append to unknown object")))?;
        object.ranges.push((range.start, range.end));
        object.descriptors.push(range.to_string());
        object.data.extend_from_slice(&data);
        Ok(())
    }

    async fn find_object(&self, name: &str, parent_id: &str) -> DriveResult<Option<ObjectId>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .created_order
            .iter()
            .find(|id| {
                inner
                    .objects
                    .get(id)
                    .is_some_and(|o| o.name == name && o.parent_id == parent_id)
            })
            .cloned())
    }
}
