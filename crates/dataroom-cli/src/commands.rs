use std::path::PathBuf;

use anyhow::{bail, Context};
use colored::Colorize;
use dataroom_content::InMemoryContentStore;
use dataroom_persist::{AuthFlag, DirectoryBackend};
use dataroom_sdk::{
    breadcrumbs, folder_tree, format_size, FolderNode, Node, Session, SessionConfig, SessionError,
};
use dataroom_types::{DataroomId, FolderId};
use tracing::debug;

use crate::cli::*;
use crate::resolve;

type CliSession<'a> = Session<&'a DirectoryBackend, InMemoryContentStore>;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(dir) = cli.state_dir {
        config.state_dir = dir;
    }

    let backend = DirectoryBackend::open(&config.state_dir)
        .with_context(|| format!("opening state directory {}", config.state_dir.display()))?;
    debug!(state_dir = %config.state_dir.display(), "opened state directory");
    let auth = AuthFlag::new(&backend);

    match cli.command {
        Command::Login => cmd_login(&auth),
        Command::Logout => cmd_logout(&auth),
        command => {
            if !auth.is_authenticated()? {
                bail!("not logged in; run `dataroom login` first");
            }
            let content = InMemoryContentStore::with_quota(config.storage_quota_bytes);
            let mut session = Session::open(&backend, content, config)?;
            run_session_command(&mut session, command)
        }
    }
}

fn run_session_command(session: &mut CliSession<'_>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Rooms => cmd_rooms(session),
        Command::Create(args) => cmd_create(session, args),
        Command::RenameRoom(args) => cmd_rename_room(session, args),
        Command::DeleteRoom(args) => cmd_delete_room(session, args),
        Command::Open(args) => cmd_open(session, args),
        Command::Cd(args) => cmd_cd(session, args),
        Command::Ls(args) => cmd_ls(session, args),
        Command::Mkdir(args) => cmd_mkdir(session, args),
        Command::Upload(args) => cmd_upload(session, args),
        Command::Get(args) => cmd_get(session, args),
        Command::Rename(args) => cmd_rename(session, args),
        Command::Rm(args) => cmd_rm(session, args),
        Command::Rmdir(args) => cmd_rmdir(session, args),
        Command::Tree => cmd_tree(session),
        Command::Pwd => cmd_pwd(session),
        Command::Login | Command::Logout => Ok(()),
    }
}

fn here(session: &CliSession<'_>) -> anyhow::Result<(DataroomId, FolderId)> {
    match session.state().ui.location() {
        Some((room, folder)) => Ok((room.clone(), folder.clone())),
        None => bail!("no data room is open; run `dataroom open <room>`"),
    }
}

fn cmd_login(auth: &AuthFlag<&DirectoryBackend>) -> anyhow::Result<()> {
    auth.login()?;
    println!("{} Logged in", "✓".green().bold());
    Ok(())
}

fn cmd_logout(auth: &AuthFlag<&DirectoryBackend>) -> anyhow::Result<()> {
    auth.logout()?;
    println!("{} Logged out", "✓".green().bold());
    Ok(())
}

fn cmd_rooms(session: &CliSession<'_>) -> anyhow::Result<()> {
    let state = session.state();
    if state.data.datarooms.is_empty() {
        println!("No data rooms. Create one with `dataroom create <name>`.");
        return Ok(());
    }

    let mut rooms: Vec<_> = state.data.datarooms.values().collect();
    rooms.sort_by(|a, b| a.name.cmp(&b.name));
    for room in rooms {
        let marker = if state.ui.current_dataroom_id.as_ref() == Some(&room.id) {
            "*".green().bold()
        } else {
            " ".normal()
        };
        let files = state
            .data
            .files
            .values()
            .filter(|f| f.dataroom_id == room.id)
            .count();
        println!(
            "{marker} {}  {}  {} files  updated {}",
            room.name.bold(),
            room.id.as_str().dimmed(),
            files,
            room.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

fn cmd_create(session: &mut CliSession<'_>, args: NameArgs) -> anyhow::Result<()> {
    let id = session.create_dataroom(&args.name)?;
    println!(
        "{} Created data room {} ({})",
        "✓".green().bold(),
        args.name.trim().bold(),
        id.as_str().dimmed()
    );
    Ok(())
}

fn cmd_rename_room(session: &mut CliSession<'_>, args: RenameArgs) -> anyhow::Result<()> {
    let id = resolve::room(session.state(), &args.target)?;
    session.rename_dataroom(&id, &args.name)?;
    println!("{} Renamed data room to {}", "✓".green().bold(), args.name.trim().bold());
    Ok(())
}

fn cmd_delete_room(session: &mut CliSession<'_>, args: RoomArgs) -> anyhow::Result<()> {
    let id = resolve::room(session.state(), &args.room)?;
    session.delete_dataroom(&id)?;
    println!("{} Deleted data room {}", "✓".green().bold(), args.room.bold());
    Ok(())
}

fn cmd_open(session: &mut CliSession<'_>, args: RoomArgs) -> anyhow::Result<()> {
    let id = resolve::room(session.state(), &args.room)?;
    session.open_dataroom(&id)?;
    cmd_pwd(session)
}

fn cmd_cd(session: &mut CliSession<'_>, args: CdArgs) -> anyhow::Result<()> {
    let (room, folder) = here(session)?;
    let target = resolve::folder(session.state(), &room, &folder, &args.path)?;
    session.open_folder(&target)?;
    cmd_pwd(session)
}

fn cmd_ls(session: &mut CliSession<'_>, args: LsArgs) -> anyhow::Result<()> {
    let Some(listing) = session.listing() else {
        bail!("no data room is open; run `dataroom open <room>`");
    };
    let term = args.filter.unwrap_or_default();
    let shown = listing.filter(&term);

    if listing.is_empty() {
        println!("This folder is empty. Create a folder or upload a file.");
        return Ok(());
    }
    if shown.is_empty() {
        println!("No items match {:?} in this folder.", term.trim());
        return Ok(());
    }

    for node in shown.nodes() {
        let name = match node {
            Node::Folder(f) => format!("{}/", f.name).blue().bold(),
            Node::File(f) => f.name.normal(),
        };
        let size = node.size().map(format_size).unwrap_or_else(|| "-".into());
        println!(
            "{:<6} {:>10}  {}  {}",
            if node.is_folder() { "folder" } else { "file" },
            size,
            node.updated_at().format("%Y-%m-%d %H:%M").to_string().dimmed(),
            name
        );
    }
    Ok(())
}

fn cmd_mkdir(session: &mut CliSession<'_>, args: NameArgs) -> anyhow::Result<()> {
    let id = session.create_folder(&args.name)?;
    println!(
        "{} Created folder {} ({})",
        "✓".green().bold(),
        args.name.trim().blue().bold(),
        id.as_str().dimmed()
    );
    Ok(())
}

fn cmd_upload(session: &mut CliSession<'_>, args: UploadArgs) -> anyhow::Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => args
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", args.path.display()))?,
    };
    let mime_type = args
        .mime_type
        .unwrap_or_else(|| resolve::guess_mime_type(&name).to_string());
    let data = std::fs::read(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;

    let id = session.upload_file(&name, &mime_type, data)?;
    if let Some(file) = session.state().data.file(&id) {
        println!(
            "{} Uploaded {} ({})",
            "✓".green().bold(),
            file.name.bold(),
            format_size(file.size)
        );
    }
    println!(
        "  {}",
        "Content is kept for this session only; later sessions see the listing but cannot download it."
            .dimmed()
    );
    Ok(())
}

fn cmd_get(session: &CliSession<'_>, args: GetArgs) -> anyhow::Result<()> {
    let (room, folder) = here(session)?;
    let file = resolve::file(session.state(), &room, &folder, &args.target)?;
    let content = match session.download(&file) {
        Err(SessionError::ContentUnavailable(_)) => bail!(
            "content of {:?} was uploaded by an earlier invocation and is no longer held; \
             upload it again to fetch it",
            args.target
        ),
        other => other?,
    };

    let out = args.out.unwrap_or_else(|| PathBuf::from(&content.name));
    std::fs::write(&out, &content.data)
        .with_context(|| format!("writing {}", out.display()))?;
    println!(
        "{} Saved {} to {} ({})",
        "✓".green().bold(),
        content.name.bold(),
        out.display(),
        format_size(content.size())
    );
    Ok(())
}

fn cmd_rename(session: &mut CliSession<'_>, args: RenameArgs) -> anyhow::Result<()> {
    let (room, folder) = here(session)?;
    let state = session.state();
    let final_name = if let Ok(file) = resolve::file(state, &room, &folder, &args.target) {
        session.rename_file(&file, &args.name)?
    } else {
        let child = resolve::child_folder(state, &room, &folder, &args.target)
            .with_context(|| format!("nothing named {:?} here", args.target))?;
        session.rename_folder(&child, &args.name)?
    };
    println!("{} Renamed to {}", "✓".green().bold(), final_name.bold());
    Ok(())
}

fn cmd_rm(session: &mut CliSession<'_>, args: TargetArgs) -> anyhow::Result<()> {
    let (room, folder) = here(session)?;
    let file = resolve::file(session.state(), &room, &folder, &args.target)?;
    session.delete_file(&file)?;
    println!("{} Deleted {}", "✓".green().bold(), args.target.bold());
    Ok(())
}

fn cmd_rmdir(session: &mut CliSession<'_>, args: TargetArgs) -> anyhow::Result<()> {
    let (room, folder) = here(session)?;
    let target = resolve::folder(session.state(), &room, &folder, &args.target)?;
    session.delete_folder(&target)?;
    println!("{} Deleted folder {}", "✓".green().bold(), args.target.blue().bold());
    Ok(())
}

fn cmd_tree(session: &CliSession<'_>) -> anyhow::Result<()> {
    let (room, _) = here(session)?;
    let Some(tree) = folder_tree(session.state(), &room) else {
        bail!("data room {room} has no root folder");
    };
    print_tree(&tree, 0);
    Ok(())
}

fn print_tree(node: &FolderNode, depth: usize) {
    let files = match node.file_count {
        0 => String::new(),
        1 => " (1 file)".to_string(),
        n => format!(" ({n} files)"),
    };
    println!("{}{}{}", "  ".repeat(depth), node.name.blue().bold(), files.dimmed());
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}

fn cmd_pwd(session: &CliSession<'_>) -> anyhow::Result<()> {
    let (room, folder) = here(session)?;
    let state = session.state();
    let room_name = state
        .data
        .dataroom(&room)
        .map(|r| r.name.as_str())
        .unwrap_or("?");
    let path = breadcrumbs(state, &folder)
        .into_iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(" / ");
    println!("{} {} {}", room_name.bold(), "›".dimmed(), path);
    Ok(())
}
