//! The state transition function.
//!
//! [`Reducer`] turns `(state, action)` into a new state without touching the
//! input. Time and fresh ids come from its [`Environment`]; everything else
//! is a function of the arguments. Rejected actions return the input state
//! unchanged together with an [`Outcome`] saying why.

use std::fmt;

use dataroom_naming::unique_name;
use dataroom_types::{
    AppState, Dataroom, DataroomId, FileId, FileNode, Folder, FolderId, IdKind, StorageKey,
    Timestamp, UiState, ROOT_FOLDER_NAME,
};
use tracing::{debug, warn};

use crate::action::Action;
use crate::config::{FolderNamePolicy, Mutation, ReducerConfig};
use crate::cursor::repair_cursor;
use crate::env::Environment;
use crate::tree::collect_subtree;

/// The kind of entity an action referred to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Dataroom,
    Folder,
    File,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dataroom => "data room",
            Self::Folder => "folder",
            Self::File => "file",
        })
    }
}

/// What a reduction did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The action took effect.
    Applied,
    /// The action was valid but would not change anything.
    Unchanged,
    /// A referenced entity does not exist (or lives in another room).
    NotFound(Target),
    /// Deleting a data room's root folder was refused.
    RootFolderProtected(FolderId),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The result of one reduction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    pub state: AppState,
    pub outcome: Outcome,
}

/// Pure `(state, action) -> state` transition.
#[derive(Debug)]
pub struct Reducer<E> {
    env: E,
    config: ReducerConfig,
}

impl<E: Environment> Reducer<E> {
    pub fn new(env: E, config: ReducerConfig) -> Self {
        Self { env, config }
    }

    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    /// Apply `action` to `state`, discarding the outcome.
    pub fn reduce(&self, state: &AppState, action: &Action) -> AppState {
        self.reduce_with_outcome(state, action).state
    }

    /// Apply `action` to `state`.
    ///
    /// Any action other than a cursor move is followed by cursor repair, so
    /// the cursor never points at something this transition removed.
    pub fn reduce_with_outcome(&self, state: &AppState, action: &Action) -> Reduction {
        let mut next = state.clone();
        let outcome = self.apply(&mut next, action);
        debug!(action = action.name(), outcome = ?outcome, "reduced action");

        if !outcome.is_applied() {
            return Reduction {
                state: state.clone(),
                outcome,
            };
        }
        if !action.is_navigation() {
            repair_cursor(state, &mut next);
        }
        Reduction {
            state: next,
            outcome,
        }
    }

    fn apply(&self, state: &mut AppState, action: &Action) -> Outcome {
        match action {
            Action::SetCurrentDataroom { dataroom_id } => {
                state.ui.current_dataroom_id = dataroom_id.clone();
                Outcome::Applied
            }
            Action::SetCurrentFolder { folder_id } => {
                state.ui.current_folder_id = folder_id.clone();
                Outcome::Applied
            }
            Action::CreateDataroom { name } => self.create_dataroom(state, name),
            Action::RenameDataroom { dataroom_id, name } => {
                self.rename_dataroom(state, dataroom_id, name)
            }
            Action::DeleteDataroom { dataroom_id } => delete_dataroom(state, dataroom_id),
            Action::CreateFolder {
                dataroom_id,
                parent_id,
                name,
            } => self.create_folder(state, dataroom_id, parent_id, name),
            Action::UploadFile {
                dataroom_id,
                parent_id,
                name,
                mime_type,
                size,
                storage_key,
            } => self.upload_file(
                state,
                dataroom_id,
                parent_id,
                FileSpec {
                    name,
                    mime_type,
                    size: *size,
                    storage_key,
                },
            ),
            Action::DeleteFile { file_id } => self.delete_file(state, file_id),
            Action::DeleteFolder { folder_id } => self.delete_folder(state, folder_id),
            Action::RenameFile { file_id, name } => self.rename_file(state, file_id, name),
            Action::RenameFolder { folder_id, name } => self.rename_folder(state, folder_id, name),
        }
    }

    fn create_dataroom(&self, state: &mut AppState, name: &str) -> Outcome {
        let now = self.env.now();
        let id = DataroomId::new(self.env.mint_id(IdKind::Dataroom));
        let root_id = FolderId::new(self.env.mint_id(IdKind::RootFolder));

        state.data.datarooms.insert(
            id.clone(),
            Dataroom {
                id: id.clone(),
                name: name.to_string(),
                root_folder_id: root_id.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        state.data.folders.insert(
            root_id.clone(),
            Folder {
                id: root_id.clone(),
                dataroom_id: id.clone(),
                name: ROOT_FOLDER_NAME.to_string(),
                parent_id: None,
                created_at: now,
                updated_at: now,
            },
        );
        state.ui = UiState::at(id, root_id);
        Outcome::Applied
    }

    fn rename_dataroom(&self, state: &mut AppState, id: &DataroomId, name: &str) -> Outcome {
        let Some(room) = state.data.datarooms.get_mut(id) else {
            return Outcome::NotFound(Target::Dataroom);
        };
        room.name = name.to_string();
        room.updated_at = self.env.now();
        Outcome::Applied
    }

    fn create_folder(
        &self,
        state: &mut AppState,
        room: &DataroomId,
        parent: &FolderId,
        name: &str,
    ) -> Outcome {
        if let Err(missing) = check_parent(state, room, parent) {
            return Outcome::NotFound(missing);
        }

        let name = match self.config.folder_names {
            FolderNamePolicy::AllowDuplicates => name.to_string(),
            FolderNamePolicy::Deduplicate => unique_name(
                name,
                state.data.child_folders(room, parent).map(|f| f.name.as_str()),
            ),
        };
        let now = self.env.now();
        let id = FolderId::new(self.env.mint_id(IdKind::Folder));
        state.data.folders.insert(
            id.clone(),
            Folder {
                id,
                dataroom_id: room.clone(),
                name,
                parent_id: Some(parent.clone()),
                created_at: now,
                updated_at: now,
            },
        );
        self.touch(state, room, Mutation::CreateFolder, now);
        Outcome::Applied
    }

    fn upload_file(
        &self,
        state: &mut AppState,
        room: &DataroomId,
        parent: &FolderId,
        file: FileSpec<'_>,
    ) -> Outcome {
        if let Err(missing) = check_parent(state, room, parent) {
            return Outcome::NotFound(missing);
        }

        let name = unique_name(
            file.name,
            state.data.child_files(room, parent).map(|f| f.name.as_str()),
        );
        let now = self.env.now();
        let id = FileId::new(self.env.mint_id(IdKind::File));
        state.data.files.insert(
            id.clone(),
            FileNode {
                id,
                dataroom_id: room.clone(),
                parent_id: parent.clone(),
                name,
                mime_type: file.mime_type.to_string(),
                size: file.size,
                storage_key: file.storage_key.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        self.touch(state, room, Mutation::UploadFile, now);
        Outcome::Applied
    }

    fn rename_file(&self, state: &mut AppState, id: &FileId, name: &str) -> Outcome {
        let Some(file) = state.data.files.get(id) else {
            return Outcome::NotFound(Target::File);
        };
        let final_name = unique_name(
            name,
            state
                .data
                .files
                .values()
                .filter(|f| f.id != file.id && f.is_child_of(&file.dataroom_id, &file.parent_id))
                .map(|f| f.name.as_str()),
        );
        if final_name == file.name {
            return Outcome::Unchanged;
        }

        let room = file.dataroom_id.clone();
        let now = self.env.now();
        if let Some(file) = state.data.files.get_mut(id) {
            file.name = final_name;
            file.updated_at = now;
        }
        self.touch(state, &room, Mutation::RenameFile, now);
        Outcome::Applied
    }

    fn rename_folder(&self, state: &mut AppState, id: &FolderId, name: &str) -> Outcome {
        let Some(folder) = state.data.folders.get(id) else {
            return Outcome::NotFound(Target::Folder);
        };
        let final_name = unique_name(
            name,
            state
                .data
                .folders
                .values()
                .filter(|f| {
                    f.id != folder.id
                        && f.dataroom_id == folder.dataroom_id
                        && f.parent_id == folder.parent_id
                })
                .map(|f| f.name.as_str()),
        );
        if final_name == folder.name {
            return Outcome::Unchanged;
        }

        let room = folder.dataroom_id.clone();
        let now = self.env.now();
        if let Some(folder) = state.data.folders.get_mut(id) {
            folder.name = final_name;
            folder.updated_at = now;
        }
        self.touch(state, &room, Mutation::RenameFolder, now);
        Outcome::Applied
    }

    fn delete_file(&self, state: &mut AppState, id: &FileId) -> Outcome {
        let Some(file) = state.data.files.remove(id) else {
            return Outcome::NotFound(Target::File);
        };
        self.touch(state, &file.dataroom_id, Mutation::DeleteFile, self.env.now());
        Outcome::Applied
    }

    fn delete_folder(&self, state: &mut AppState, id: &FolderId) -> Outcome {
        let Some(folder) = state.data.folders.get(id) else {
            return Outcome::NotFound(Target::Folder);
        };
        let owned_by_room = state
            .data
            .dataroom(&folder.dataroom_id)
            .is_some_and(|room| room.is_root(id));
        if folder.is_root() || owned_by_room {
            warn!(folder = %id, dataroom = %folder.dataroom_id, "refusing to delete root folder");
            return Outcome::RootFolderProtected(id.clone());
        }

        let room = folder.dataroom_id.clone();
        let doomed = collect_subtree(&state.data.folders, id);
        state.data.folders.retain(|fid, _| !doomed.contains(fid));
        state.data.files.retain(|_, f| !doomed.contains(&f.parent_id));
        debug!(folder = %id, removed = doomed.len(), "deleted folder subtree");

        self.touch(state, &room, Mutation::DeleteFolder, self.env.now());
        Outcome::Applied
    }

    /// Bump the room's `updated_at` if the touch policy says so.
    fn touch(&self, state: &mut AppState, room: &DataroomId, mutation: Mutation, now: Timestamp) {
        if !self.config.touch.bumps(mutation) {
            return;
        }
        if let Some(room) = state.data.datarooms.get_mut(room) {
            room.updated_at = now;
        }
    }
}

/// Borrowed upload fields.
struct FileSpec<'a> {
    name: &'a str,
    mime_type: &'a str,
    size: u64,
    storage_key: &'a StorageKey,
}

fn delete_dataroom(state: &mut AppState, id: &DataroomId) -> Outcome {
    if state.data.datarooms.remove(id).is_none() {
        return Outcome::NotFound(Target::Dataroom);
    }
    state.data.folders.retain(|_, f| &f.dataroom_id != id);
    state.data.files.retain(|_, f| &f.dataroom_id != id);
    Outcome::Applied
}

/// A new child needs an existing room and a parent folder inside it.
///
/// `CreateFolder` and `UploadFile` are refused with `NotFound` of the
/// returned target when this fails.
pub fn check_parent(state: &AppState, room: &DataroomId, parent: &FolderId) -> Result<(), Target> {
    if state.data.dataroom(room).is_none() {
        return Err(Target::Dataroom);
    }
    match state.data.folder(parent) {
        Some(folder) if &folder.dataroom_id == room => Ok(()),
        _ => Err(Target::Folder),
    }
}

/// Reduce with a one-off [`Reducer`].
pub fn reduce<E: Environment>(
    state: &AppState,
    action: &Action,
    env: &E,
    config: &ReducerConfig,
) -> AppState {
    Reducer::new(env, *config).reduce(state, action)
}

/// Reduce with a one-off [`Reducer`], keeping the outcome.
pub fn reduce_with_outcome<E: Environment>(
    state: &AppState,
    action: &Action,
    env: &E,
    config: &ReducerConfig,
) -> Reduction {
    Reducer::new(env, *config).reduce_with_outcome(state, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TouchPolicy;
    use crate::env::FixedEnvironment;
    use crate::tree::ancestors;
    use chrono::{TimeDelta, TimeZone, Utc};
    use proptest::prelude::*;

    fn env() -> FixedEnvironment {
        FixedEnvironment::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
    }

    fn reducer(config: ReducerConfig) -> Reducer<FixedEnvironment> {
        Reducer::new(env(), config)
    }

    fn current(state: &AppState) -> (DataroomId, FolderId) {
        let (room, folder) = state.ui.location().unwrap();
        (room.clone(), folder.clone())
    }

    fn create_room(r: &Reducer<FixedEnvironment>, name: &str) -> (AppState, DataroomId, FolderId) {
        let state = r.reduce(
            &AppState::new(),
            &Action::CreateDataroom { name: name.into() },
        );
        let (room, root) = current(&state);
        (state, room, root)
    }

    fn upload(room: &DataroomId, parent: &FolderId, name: &str) -> Action {
        Action::UploadFile {
            dataroom_id: room.clone(),
            parent_id: parent.clone(),
            name: name.into(),
            mime_type: "application/pdf".into(),
            size: 10,
            storage_key: StorageKey::new(format!("1_{name}")),
        }
    }

    fn mkdir(room: &DataroomId, parent: &FolderId, name: &str) -> Action {
        Action::CreateFolder {
            dataroom_id: room.clone(),
            parent_id: parent.clone(),
            name: name.into(),
        }
    }

    fn file_named<'a>(state: &'a AppState, name: &str) -> Option<&'a FileNode> {
        state.data.files.values().find(|f| f.name == name)
    }

    fn folder_named<'a>(state: &'a AppState, name: &str) -> Option<&'a Folder> {
        state.data.folders.values().find(|f| f.name == name)
    }

    #[test]
    fn create_dataroom_builds_root_and_moves_cursor() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");

        assert_eq!(state.data.datarooms.len(), 1);
        let dataroom = &state.data.datarooms[&room];
        assert_eq!(dataroom.name, "Acme");
        assert_eq!(dataroom.root_folder_id, root);

        let root_folder = &state.data.folders[&root];
        assert_eq!(root_folder.name, ROOT_FOLDER_NAME);
        assert!(root_folder.is_root());
        assert_eq!(state.ui.current_folder_id, Some(root));
        assert!(room.as_str().starts_with("dr_"));
    }

    #[test]
    fn duplicate_upload_gets_suffix() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let state = r.reduce(&state, &upload(&room, &root, "report.pdf"));
        let state = r.reduce(&state, &upload(&room, &root, "report.pdf"));

        let mut names: Vec<_> = state.data.files.values().map(|f| f.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["report (1).pdf", "report.pdf"]);
    }

    #[test]
    fn rename_file_to_same_name_is_unchanged() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let state = r.reduce(&state, &upload(&room, &root, "a.pdf"));
        let file_id = file_named(&state, "a.pdf").unwrap().id.clone();

        r.environment().advance(TimeDelta::seconds(30));
        let reduction = r.reduce_with_outcome(
            &state,
            &Action::RenameFile {
                file_id,
                name: "a.pdf".into(),
            },
        );
        assert_eq!(reduction.outcome, Outcome::Unchanged);
        assert_eq!(reduction.state, state);
    }

    #[test]
    fn rename_file_avoids_sibling_names() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let state = r.reduce(&state, &upload(&room, &root, "a.pdf"));
        let state = r.reduce(&state, &upload(&room, &root, "b.pdf"));
        let b = file_named(&state, "b.pdf").unwrap().id.clone();

        let state = r.reduce(
            &state,
            &Action::RenameFile {
                file_id: b.clone(),
                name: "a.pdf".into(),
            },
        );
        assert_eq!(state.data.files[&b].name, "a (1).pdf");
    }

    #[test]
    fn delete_current_subfolder_relocates_cursor_to_root() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let state = r.reduce(&state, &mkdir(&room, &root, "Sub"));
        let sub = folder_named(&state, "Sub").unwrap().id.clone();
        let state = r.reduce(&state, &upload(&room, &sub, "x.pdf"));
        let state = r.reduce(
            &state,
            &Action::SetCurrentFolder {
                folder_id: Some(sub.clone()),
            },
        );

        let state = r.reduce(&state, &Action::DeleteFolder { folder_id: sub.clone() });
        assert!(!state.data.folders.contains_key(&sub));
        assert!(file_named(&state, "x.pdf").is_none());
        assert_eq!(state.ui.current_folder_id, Some(root));
        assert_eq!(state.ui.current_dataroom_id, Some(room));
    }

    #[test]
    fn delete_nested_current_folder_moves_to_nearest_survivor() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let state = r.reduce(&state, &mkdir(&room, &root, "a"));
        let a = folder_named(&state, "a").unwrap().id.clone();
        let state = r.reduce(&state, &mkdir(&room, &a, "b"));
        let b = folder_named(&state, "b").unwrap().id.clone();
        let state = r.reduce(&state, &mkdir(&room, &b, "c"));
        let c = folder_named(&state, "c").unwrap().id.clone();
        let state = r.reduce(&state, &Action::SetCurrentFolder { folder_id: Some(c) });

        let state = r.reduce(&state, &Action::DeleteFolder { folder_id: b });
        assert_eq!(state.ui.current_folder_id, Some(a));
    }

    #[test]
    fn delete_current_dataroom_clears_cursor() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let state = r.reduce(&state, &mkdir(&room, &root, "Sub"));
        let state = r.reduce(&state, &upload(&room, &root, "a.pdf"));

        let state = r.reduce(&state, &Action::DeleteDataroom { dataroom_id: room });
        assert!(state.data.is_empty());
        assert_eq!(state.ui, UiState::default());
    }

    #[test]
    fn delete_other_dataroom_keeps_cursor() {
        let r = reducer(ReducerConfig::default());
        let (state, first, _) = create_room(&r, "First");
        let state = r.reduce(&state, &Action::CreateDataroom { name: "Second".into() });
        let cursor = state.ui.clone();

        let state = r.reduce(&state, &Action::DeleteDataroom { dataroom_id: first });
        assert_eq!(state.ui, cursor);
        assert_eq!(state.data.datarooms.len(), 1);
        assert_eq!(state.data.folders.len(), 1);
    }

    #[test]
    fn root_folder_cannot_be_deleted() {
        let r = reducer(ReducerConfig::default());
        let (state, _, root) = create_room(&r, "Acme");
        let reduction = r.reduce_with_outcome(&state, &Action::DeleteFolder { folder_id: root.clone() });
        assert_eq!(reduction.outcome, Outcome::RootFolderProtected(root));
        assert_eq!(reduction.state, state);
    }

    #[test]
    fn unknown_targets_are_no_ops() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let ghost_room = DataroomId::new("dr_ghost");
        let ghost_folder = FolderId::new("folder_ghost");

        let cases = [
            (
                Action::RenameDataroom {
                    dataroom_id: ghost_room.clone(),
                    name: "x".into(),
                },
                Target::Dataroom,
            ),
            (
                Action::DeleteDataroom {
                    dataroom_id: ghost_room.clone(),
                },
                Target::Dataroom,
            ),
            (mkdir(&ghost_room, &root, "x"), Target::Dataroom),
            (mkdir(&room, &ghost_folder, "x"), Target::Folder),
            (upload(&room, &ghost_folder, "x.pdf"), Target::Folder),
            (
                Action::DeleteFile {
                    file_id: FileId::new("file_ghost"),
                },
                Target::File,
            ),
            (
                Action::DeleteFolder {
                    folder_id: ghost_folder.clone(),
                },
                Target::Folder,
            ),
            (
                Action::RenameFile {
                    file_id: FileId::new("file_ghost"),
                    name: "x".into(),
                },
                Target::File,
            ),
            (
                Action::RenameFolder {
                    folder_id: ghost_folder,
                    name: "x".into(),
                },
                Target::Folder,
            ),
        ];

        for (action, target) in cases {
            let reduction = r.reduce_with_outcome(&state, &action);
            assert_eq!(reduction.outcome, Outcome::NotFound(target), "{action:?}");
            assert_eq!(reduction.state, state, "{action:?}");
        }
    }

    #[test]
    fn parent_from_another_room_is_rejected() {
        let r = reducer(ReducerConfig::default());
        let (state, first, _) = create_room(&r, "First");
        let state = r.reduce(&state, &Action::CreateDataroom { name: "Second".into() });
        let (_, second_root) = current(&state);

        let reduction = r.reduce_with_outcome(&state, &mkdir(&first, &second_root, "x"));
        assert_eq!(reduction.outcome, Outcome::NotFound(Target::Folder));
    }

    #[test]
    fn folder_policy_controls_duplicates() {
        let allow = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&allow, "Acme");
        let state = allow.reduce(&state, &mkdir(&room, &root, "Docs"));
        let state = allow.reduce(&state, &mkdir(&room, &root, "Docs"));
        assert_eq!(
            state.data.folders.values().filter(|f| f.name == "Docs").count(),
            2
        );

        let dedup = reducer(ReducerConfig {
            folder_names: FolderNamePolicy::Deduplicate,
            ..ReducerConfig::default()
        });
        let (state, room, root) = create_room(&dedup, "Acme");
        let state = dedup.reduce(&state, &mkdir(&room, &root, "Docs"));
        let state = dedup.reduce(&state, &mkdir(&room, &root, "Docs"));
        assert!(folder_named(&state, "Docs").is_some());
        assert!(folder_named(&state, "Docs (1)").is_some());
    }

    #[test]
    fn rename_folder_deduplicates_among_siblings() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let state = r.reduce(&state, &mkdir(&room, &root, "Legal"));
        let state = r.reduce(&state, &mkdir(&room, &root, "Finance"));
        let finance = folder_named(&state, "Finance").unwrap().id.clone();

        let state = r.reduce(
            &state,
            &Action::RenameFolder {
                folder_id: finance.clone(),
                name: "Legal".into(),
            },
        );
        assert_eq!(state.data.folders[&finance].name, "Legal (1)");
    }

    #[test]
    fn touch_policy_decides_room_timestamp() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let created = state.data.datarooms[&room].updated_at;

        r.environment().advance(TimeDelta::seconds(10));
        let state = r.reduce(&state, &upload(&room, &root, "a.pdf"));
        let after_upload = state.data.datarooms[&room].updated_at;
        assert!(after_upload > created);

        r.environment().advance(TimeDelta::seconds(10));
        let file_id = file_named(&state, "a.pdf").unwrap().id.clone();
        let state = r.reduce(
            &state,
            &Action::RenameFile {
                file_id: file_id.clone(),
                name: "b.pdf".into(),
            },
        );
        assert_eq!(state.data.datarooms[&room].updated_at, after_upload);
        assert!(state.data.files[&file_id].updated_at > after_upload);

        let eager = reducer(ReducerConfig {
            touch: TouchPolicy::all(),
            ..ReducerConfig::default()
        });
        let (state, room, root) = create_room(&eager, "Acme");
        let state = eager.reduce(&state, &mkdir(&room, &root, "a"));
        let a = folder_named(&state, "a").unwrap().id.clone();
        eager.environment().advance(TimeDelta::seconds(10));
        let before = state.data.datarooms[&room].updated_at;
        let state = eager.reduce(
            &state,
            &Action::RenameFolder {
                folder_id: a,
                name: "b".into(),
            },
        );
        assert!(state.data.datarooms[&room].updated_at > before);
    }

    #[test]
    fn delete_file_removes_it_and_bumps_room() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let state = r.reduce(&state, &upload(&room, &root, "a.pdf"));
        let state = r.reduce(&state, &upload(&room, &root, "b.pdf"));
        let a = file_named(&state, "a.pdf").unwrap().id.clone();
        let before = state.data.datarooms[&room].updated_at;

        r.environment().advance(TimeDelta::seconds(30));
        let reduction = r.reduce_with_outcome(&state, &Action::DeleteFile { file_id: a.clone() });

        assert_eq!(reduction.outcome, Outcome::Applied);
        let after = reduction.state;
        assert!(!after.data.files.contains_key(&a));
        assert!(file_named(&after, "b.pdf").is_some());
        assert_eq!(after.data.folders, state.data.folders);
        assert_eq!(after.ui, state.ui);
        assert_eq!(
            after.data.datarooms[&room].updated_at,
            before + TimeDelta::seconds(30)
        );
    }

    #[test]
    fn delete_folder_bumps_room() {
        let r = reducer(ReducerConfig::default());
        let (state, room, root) = create_room(&r, "Acme");
        let state = r.reduce(&state, &mkdir(&room, &root, "Legal"));
        let legal = folder_named(&state, "Legal").unwrap().id.clone();
        let state = r.reduce(&state, &upload(&room, &legal, "nda.pdf"));
        let before = state.data.datarooms[&room].updated_at;

        r.environment().advance(TimeDelta::seconds(30));
        let state = r.reduce(&state, &Action::DeleteFolder { folder_id: legal.clone() });

        assert!(!state.data.folders.contains_key(&legal));
        assert!(state.data.files.is_empty());
        assert_eq!(
            state.data.datarooms[&room].updated_at,
            before + TimeDelta::seconds(30)
        );
    }

    #[test]
    fn rename_dataroom_updates_its_timestamp() {
        let r = reducer(ReducerConfig::default());
        let (state, room, _) = create_room(&r, "Acme");
        r.environment().advance(TimeDelta::minutes(1));
        let state = r.reduce(
            &state,
            &Action::RenameDataroom {
                dataroom_id: room.clone(),
                name: "Acme Corp".into(),
            },
        );
        let dataroom = &state.data.datarooms[&room];
        assert_eq!(dataroom.name, "Acme Corp");
        assert!(dataroom.updated_at > dataroom.created_at);
    }

    #[test]
    fn set_current_folder_is_idempotent() {
        let r = reducer(ReducerConfig::default());
        let (state, _, _) = create_room(&r, "Acme");
        let action = Action::SetCurrentFolder {
            folder_id: Some(FolderId::new("anything")),
        };
        let once = r.reduce(&state, &action);
        let twice = r.reduce(&once, &action);
        assert_eq!(once, twice);
        assert_eq!(once.ui.current_folder_id, Some(FolderId::new("anything")));
    }

    #[test]
    fn free_functions_match_reducer() {
        let env = env();
        let config = ReducerConfig::default();
        let state = reduce(
            &AppState::new(),
            &Action::CreateDataroom { name: "Acme".into() },
            &env,
            &config,
        );
        let reduction = reduce_with_outcome(
            &state,
            &Action::SetCurrentFolder { folder_id: None },
            &env,
            &config,
        );
        assert!(reduction.outcome.is_applied());
        assert_eq!(reduction.state.ui.current_folder_id, None);
    }

    /// Build a room whose folders form a random tree, next to a small
    /// bystander room that no step touches. Each step picks an existing
    /// folder as parent and optionally uploads a file into the new folder.
    fn random_tree(
        steps: &[(prop::sample::Index, bool)],
    ) -> (Reducer<FixedEnvironment>, AppState, DataroomId) {
        let r = reducer(ReducerConfig::default());
        let (mut state, other, other_root) = create_room(&r, "Bystander");
        state = r.reduce(&state, &mkdir(&other, &other_root, "kept"));
        let kept = folder_named(&state, "kept").unwrap().id.clone();
        state = r.reduce(&state, &upload(&other, &kept, "kept.pdf"));

        state = r.reduce(&state, &Action::CreateDataroom { name: "Tree".into() });
        let (room, root) = current(&state);
        let mut folders = vec![root];
        for (i, (pick, with_file)) in steps.iter().enumerate() {
            let parent = pick.get(&folders).clone();
            state = r.reduce(&state, &mkdir(&room, &parent, &format!("f{i}")));
            let created = folder_named(&state, &format!("f{i}")).unwrap().id.clone();
            if *with_file {
                state = r.reduce(&state, &upload(&room, &created, &format!("{i}.pdf")));
            }
            folders.push(created);
        }
        (r, state, room)
    }

    proptest! {
        #[test]
        fn delete_folder_removes_exactly_the_subtree(
            steps in prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 1..24),
            target in any::<prop::sample::Index>(),
        ) {
            let (r, state, room) = random_tree(&steps);
            let candidates: Vec<FolderId> = state
                .data
                .folders
                .values()
                .filter(|f| f.dataroom_id == room && !f.is_root())
                .map(|f| f.id.clone())
                .collect();
            let target = target.get(&candidates).clone();

            let doomed: Vec<FolderId> = state
                .data
                .folders
                .keys()
                .filter(|id| {
                    *id == &target || ancestors(&state.data.folders, id).contains(&target)
                })
                .cloned()
                .collect();

            let after = r.reduce(&state, &Action::DeleteFolder { folder_id: target });

            for id in state.data.folders.keys() {
                prop_assert_eq!(after.data.folders.contains_key(id), !doomed.contains(id));
            }
            for (id, file) in &state.data.files {
                prop_assert_eq!(
                    after.data.files.contains_key(id),
                    !doomed.contains(&file.parent_id)
                );
            }
            prop_assert_eq!(after.data.datarooms.len(), 2);
            for (id, dataroom) in &state.data.datarooms {
                if id != &room {
                    prop_assert_eq!(&after.data.datarooms[id], dataroom);
                }
            }
            for (id, folder) in state.data.folders.iter().filter(|(_, f)| f.dataroom_id != room) {
                prop_assert_eq!(after.data.folders.get(id), Some(folder));
            }
            for (id, file) in state.data.files.iter().filter(|(_, f)| f.dataroom_id != room) {
                prop_assert_eq!(after.data.files.get(id), Some(file));
            }
        }

        #[test]
        fn root_delete_never_changes_state(
            steps in prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 0..16),
        ) {
            let (r, state, room) = random_tree(&steps);
            let root = state.data.datarooms[&room].root_folder_id.clone();
            let reduction = r.reduce_with_outcome(&state, &Action::DeleteFolder { folder_id: root });
            prop_assert!(matches!(reduction.outcome, Outcome::RootFolderProtected(_)));
            prop_assert_eq!(reduction.state, state);
        }
    }
}
