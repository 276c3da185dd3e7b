use std::collections::BTreeMap;

use bytes::Bytes;
use dataroom_content::{ContentStore, StoredContent};
use dataroom_naming::{validate_file_rename, validate_name};
use dataroom_persist::{SlotBackend, StateStore};
use dataroom_state::{
    check_parent, current_listing, Action, Environment, Listing, Outcome, Reducer,
    SystemEnvironment, Target,
};
use dataroom_types::{AppState, DataroomId, FileId, FolderId};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};

/// A data room session.
///
/// Owns the current [`AppState`], the reducer that evolves it, the content
/// store holding this session's uploads, and the slot the state is saved
/// to. Every mutation that takes effect is saved before the call returns.
///
/// Operations validate user input before dispatching: names must be
/// non-empty, file renames must keep their extension, uploads must be an
/// accepted type. Operations that act "here" use the navigation cursor and
/// fail with [`SessionError::NoCurrentFolder`] when nothing is open.
pub struct Session<B, C, E = SystemEnvironment> {
    store: StateStore<B>,
    content: C,
    reducer: Reducer<E>,
    config: SessionConfig,
    state: AppState,
}

impl<B: SlotBackend, C: ContentStore> Session<B, C> {
    /// Open a session with the system clock and random ids.
    pub fn open(backend: B, content: C, config: SessionConfig) -> SessionResult<Self> {
        Self::open_with_env(backend, content, config, SystemEnvironment)
    }
}

impl<B: SlotBackend, C: ContentStore, E: Environment> Session<B, C, E> {
    /// Open a session, restoring the saved state or starting empty.
    pub fn open_with_env(
        backend: B,
        content: C,
        config: SessionConfig,
        env: E,
    ) -> SessionResult<Self> {
        let store = StateStore::new(backend);
        let state = store.load()?.unwrap_or_default();
        debug!(
            datarooms = state.data.datarooms.len(),
            files = state.data.files.len(),
            "session opened"
        );
        Ok(Self {
            store,
            content,
            reducer: Reducer::new(env, config.reducer),
            config,
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn backend(&self) -> &B {
        self.store.backend()
    }

    // ---- Raw dispatch ----

    /// Run `action` through the reducer and save the result if it applied.
    ///
    /// No validation happens here; the outcome is returned as-is.
    pub fn dispatch(&mut self, action: Action) -> SessionResult<Outcome> {
        let reduction = self.reducer.reduce_with_outcome(&self.state, &action);
        if reduction.outcome.is_applied() {
            self.state = reduction.state;
            self.store.save(&self.state)?;
        }
        Ok(reduction.outcome)
    }

    /// Dispatch and turn rejections into errors. `Unchanged` is success.
    fn commit(&mut self, action: Action) -> SessionResult<()> {
        match self.dispatch(action)? {
            Outcome::Applied | Outcome::Unchanged => Ok(()),
            Outcome::NotFound(target) => Err(SessionError::NotFound(target)),
            Outcome::RootFolderProtected(id) => Err(SessionError::RootFolderProtected(id)),
        }
    }

    fn current_folder(&self) -> SessionResult<(DataroomId, FolderId)> {
        let (room, folder) = self
            .state
            .ui
            .location()
            .ok_or(SessionError::NoCurrentFolder)?;
        Ok((room.clone(), folder.clone()))
    }

    // ---- Data rooms ----

    /// Create a data room and open its root folder.
    pub fn create_dataroom(&mut self, name: &str) -> SessionResult<DataroomId> {
        let name = validate_name(name)?;
        let before = self.state.data.datarooms.clone();
        self.commit(Action::CreateDataroom { name: name.clone() })?;
        let id = first_new_key(&before, &self.state.data.datarooms)
            .ok_or(SessionError::NotFound(Target::Dataroom))?;
        info!(dataroom = %id, name = %name, "created data room");
        Ok(id)
    }

    pub fn rename_dataroom(&mut self, id: &DataroomId, name: &str) -> SessionResult<()> {
        let name = validate_name(name)?;
        self.commit(Action::RenameDataroom {
            dataroom_id: id.clone(),
            name: name.clone(),
        })?;
        info!(dataroom = %id, name = %name, "renamed data room");
        Ok(())
    }

    /// Delete a data room with everything in it.
    ///
    /// Content blobs are left in the store; it never evicts.
    pub fn delete_dataroom(&mut self, id: &DataroomId) -> SessionResult<()> {
        self.commit(Action::DeleteDataroom {
            dataroom_id: id.clone(),
        })?;
        info!(dataroom = %id, "deleted data room");
        Ok(())
    }

    /// Point the cursor at a data room's root folder.
    pub fn open_dataroom(&mut self, id: &DataroomId) -> SessionResult<()> {
        let root = self
            .state
            .data
            .dataroom(id)
            .map(|room| room.root_folder_id.clone())
            .ok_or(SessionError::NotFound(Target::Dataroom))?;
        self.commit(Action::SetCurrentDataroom {
            dataroom_id: Some(id.clone()),
        })?;
        self.commit(Action::SetCurrentFolder {
            folder_id: Some(root),
        })
    }

    /// Point the cursor at a folder, switching rooms if needed.
    pub fn open_folder(&mut self, id: &FolderId) -> SessionResult<()> {
        let room = self
            .state
            .data
            .folder(id)
            .map(|folder| folder.dataroom_id.clone())
            .ok_or(SessionError::NotFound(Target::Folder))?;
        if self.state.ui.current_dataroom_id.as_ref() != Some(&room) {
            self.commit(Action::SetCurrentDataroom {
                dataroom_id: Some(room),
            })?;
        }
        self.commit(Action::SetCurrentFolder {
            folder_id: Some(id.clone()),
        })
    }

    // ---- Folders ----

    /// Create a folder inside the open folder.
    pub fn create_folder(&mut self, name: &str) -> SessionResult<FolderId> {
        let name = validate_name(name)?;
        let (room, parent) = self.current_folder()?;
        let before = self.state.data.folders.clone();
        self.commit(Action::CreateFolder {
            dataroom_id: room,
            parent_id: parent.clone(),
            name,
        })?;
        let id = first_new_key(&before, &self.state.data.folders)
            .ok_or(SessionError::NotFound(Target::Folder))?;
        info!(folder = %id, parent = %parent, "created folder");
        Ok(id)
    }

    /// Rename a folder. Returns the final name after collision handling.
    pub fn rename_folder(&mut self, id: &FolderId, name: &str) -> SessionResult<String> {
        let name = validate_name(name)?;
        self.commit(Action::RenameFolder {
            folder_id: id.clone(),
            name,
        })?;
        let final_name = self
            .state
            .data
            .folder(id)
            .map(|f| f.name.clone())
            .ok_or(SessionError::NotFound(Target::Folder))?;
        info!(folder = %id, name = %final_name, "renamed folder");
        Ok(final_name)
    }

    /// Delete a folder, its subfolders and their files.
    pub fn delete_folder(&mut self, id: &FolderId) -> SessionResult<()> {
        self.commit(Action::DeleteFolder {
            folder_id: id.clone(),
        })?;
        info!(folder = %id, "deleted folder");
        Ok(())
    }

    // ---- Files ----

    /// Store `data` and register it as a file in the open folder.
    ///
    /// Nothing is registered when the type is not accepted or the content
    /// store is full.
    pub fn upload_file(
        &mut self,
        name: &str,
        mime_type: &str,
        data: impl Into<Bytes>,
    ) -> SessionResult<FileId> {
        let name = validate_name(name)?;
        if !self.config.accepts(&name, mime_type) {
            return Err(SessionError::UnsupportedFileType {
                name,
                mime_type: mime_type.to_string(),
                accepted: self.config.accepted_summary(),
            });
        }
        let (room, parent) = self.current_folder()?;
        // The store never evicts; reject a bad target before saving.
        check_parent(&self.state, &room, &parent).map_err(SessionError::NotFound)?;

        let content = StoredContent::new(name.clone(), mime_type, data);
        let size = content.size();
        let storage_key = self.content.save(content)?;

        let before = self.state.data.files.clone();
        self.commit(Action::UploadFile {
            dataroom_id: room,
            parent_id: parent,
            name,
            mime_type: mime_type.to_string(),
            size,
            storage_key,
        })?;
        let id = first_new_key(&before, &self.state.data.files)
            .ok_or(SessionError::NotFound(Target::File))?;
        info!(file = %id, size, "uploaded file");
        Ok(id)
    }

    /// Rename a file, keeping its extension. Returns the final name after
    /// collision handling.
    pub fn rename_file(&mut self, id: &FileId, name: &str) -> SessionResult<String> {
        let current = self
            .state
            .data
            .file(id)
            .map(|f| f.name.clone())
            .ok_or(SessionError::NotFound(Target::File))?;
        let name = validate_file_rename(&current, name)?;
        self.commit(Action::RenameFile {
            file_id: id.clone(),
            name,
        })?;
        let final_name = self
            .state
            .data
            .file(id)
            .map(|f| f.name.clone())
            .unwrap_or(current);
        info!(file = %id, name = %final_name, "renamed file");
        Ok(final_name)
    }

    pub fn delete_file(&mut self, id: &FileId) -> SessionResult<()> {
        self.commit(Action::DeleteFile {
            file_id: id.clone(),
        })?;
        info!(file = %id, "deleted file");
        Ok(())
    }

    /// Fetch a file's content from this session's store.
    ///
    /// Fails with [`SessionError::ContentUnavailable`] when the metadata
    /// exists but the bytes were uploaded by an earlier session.
    pub fn download(&self, id: &FileId) -> SessionResult<StoredContent> {
        let file = self
            .state
            .data
            .file(id)
            .ok_or(SessionError::NotFound(Target::File))?;
        self.content
            .get(&file.storage_key)?
            .ok_or_else(|| SessionError::ContentUnavailable(id.clone()))
    }

    // ---- Queries ----

    /// Contents of the open folder, or `None` if nothing is open.
    pub fn listing(&self) -> Option<Listing<'_>> {
        current_listing(&self.state)
    }
}

/// The first key of `after` missing from `before`.
fn first_new_key<K: Ord + Clone, V>(before: &BTreeMap<K, V>, after: &BTreeMap<K, V>) -> Option<K> {
    after.keys().find(|k| !before.contains_key(k)).cloned()
}
