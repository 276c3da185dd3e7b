use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dataroom",
    about = "Data room: organize PDF documents into rooms and folders",
    long_about = "Data room: organize PDF documents into rooms and folders.\n\n\
        Rooms, folders and file listings are saved in the state directory. \
        Uploaded file content is held in memory by the invocation that \
        uploads it and is gone when that invocation exits, so `get` only \
        works on files uploaded by the same process.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for saved state (overrides the config file)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in to the demo
    Login,
    /// Sign out of the demo
    Logout,
    /// List data rooms
    Rooms,
    /// Create a data room and open it
    Create(NameArgs),
    /// Rename a data room
    RenameRoom(RenameArgs),
    /// Delete a data room and everything in it
    DeleteRoom(RoomArgs),
    /// Open a data room at its root folder
    Open(RoomArgs),
    /// Change the open folder
    Cd(CdArgs),
    /// List the open folder
    Ls(LsArgs),
    /// Create a folder in the open folder
    Mkdir(NameArgs),
    /// Upload a PDF into the open folder
    Upload(UploadArgs),
    /// Save a file's content from the open folder to disk
    Get(GetArgs),
    /// Rename a file or folder in the open folder
    Rename(RenameArgs),
    /// Delete a file from the open folder
    Rm(TargetArgs),
    /// Delete a folder and everything under it
    Rmdir(TargetArgs),
    /// Show the folder tree of the open data room
    Tree,
    /// Show where the cursor is
    Pwd,
}

#[derive(Args)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Args)]
pub struct RoomArgs {
    /// Room name or id
    pub room: String,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Current name or id
    pub target: String,
    pub name: String,
}

#[derive(Args)]
pub struct CdArgs {
    /// Folder path (`..`, `/`, `Legal/Contracts`) or id
    #[arg(default_value = "/")]
    pub path: String,
}

#[derive(Args)]
pub struct LsArgs {
    /// Only show entries whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct UploadArgs {
    pub path: PathBuf,
    /// Name to store the file under (defaults to the file name)
    #[arg(long)]
    pub name: Option<String>,
    /// Declared MIME type (guessed from the extension if omitted)
    #[arg(long)]
    pub mime_type: Option<String>,
}

#[derive(Args)]
pub struct GetArgs {
    /// File name or id
    pub target: String,
    /// Where to write the content (defaults to the file name)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct TargetArgs {
    /// Name or id
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_create() {
        let cli = Cli::try_parse_from(["dataroom", "create", "Acme"]).unwrap();
        if let Command::Create(args) = cli.command {
            assert_eq!(args.name, "Acme");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_rename_room() {
        let cli = Cli::try_parse_from(["dataroom", "rename-room", "Acme", "Acme Corp"]).unwrap();
        if let Command::RenameRoom(args) = cli.command {
            assert_eq!(args.target, "Acme");
            assert_eq!(args.name, "Acme Corp");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_ls_filter() {
        let cli = Cli::try_parse_from(["dataroom", "ls", "--filter", "report"]).unwrap();
        if let Command::Ls(args) = cli.command {
            assert_eq!(args.filter.as_deref(), Some("report"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_upload() {
        let cli = Cli::try_parse_from([
            "dataroom",
            "upload",
            "./q3.pdf",
            "--name",
            "Q3 Report.pdf",
        ])
        .unwrap();
        if let Command::Upload(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("./q3.pdf"));
            assert_eq!(args.name.as_deref(), Some("Q3 Report.pdf"));
            assert!(args.mime_type.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_get() {
        let cli = Cli::try_parse_from(["dataroom", "get", "nda.pdf", "-o", "/tmp/nda.pdf"]).unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.target, "nda.pdf");
            assert_eq!(args.out, Some(PathBuf::from("/tmp/nda.pdf")));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn cd_defaults_to_root() {
        let cli = Cli::try_parse_from(["dataroom", "cd"]).unwrap();
        if let Command::Cd(args) = cli.command {
            assert_eq!(args.path, "/");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "dataroom",
            "rooms",
            "-v",
            "--state-dir",
            "/tmp/rooms",
            "--config",
            "dataroom.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.state_dir, Some(PathBuf::from("/tmp/rooms")));
        assert_eq!(cli.config, Some(PathBuf::from("dataroom.toml")));
        assert!(matches!(cli.command, Command::Rooms));
    }
}
