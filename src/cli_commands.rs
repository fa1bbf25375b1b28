use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Write .docdesk/config.json for a backend
    Init(InitArgs),

    /// Print the remote tree
    Tree(JsonArgs),

    /// Create a folder (parent folders are path segments)
    Mkdir(PathArgs),

    /// Create an empty .json or .txt file
    Touch(PathArgs),

    /// Rename a file or folder
    #[command(name = "mv")]
    Mv(MvArgs),

    /// Delete a file or folder
    #[command(name = "rm")]
    Rm(PathArgs),

    /// Upload a local file into a folder
    Upload(UploadArgs),

    /// Print a file's content
    Cat(PathArgs),

    /// Print a temporary download URL for a file
    DownloadUrl(PathArgs),

    /// List ingestion statuses
    Status(StatusArgs),

    /// Show the ingestion record of one document
    FileStatus(FileStatusArgs),

    /// Queue documents for ingestion
    Sync(SyncArgs),

    /// Remove documents from the knowledge base
    Wipe(WipeArgs),

    /// Ask the assistant a question about the documents
    Ask(AskArgs),
}

#[derive(Args)]
pub(crate) struct InitArgs {
    /// Base URL serving both APIs (e.g. a local docdesk-devserver)
    #[arg(long, conflicts_with_all = ["tree_url", "api_url"])]
    pub(crate) url: Option<String>,
    /// Base URL of the tree/folder API
    #[arg(long, requires = "api_url")]
    pub(crate) tree_url: Option<String>,
    /// Base URL of the file/ingestion API
    #[arg(long, requires = "tree_url")]
    pub(crate) api_url: Option<String>,
    #[arg(long)]
    pub(crate) bucket: String,
    #[arg(long)]
    pub(crate) token: Option<String>,
    #[arg(long)]
    pub(crate) user_id: Option<String>,
    #[arg(long, default_value = "user")]
    pub(crate) user_role: String,
    /// HTTP timeout in seconds
    #[arg(long)]
    pub(crate) timeout_secs: Option<u64>,
    /// Overwrite an existing config
    #[arg(long)]
    pub(crate) force: bool,
    /// Directory to initialize (defaults to current directory)
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct JsonArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct PathArgs {
    pub(crate) path: String,
}

#[derive(Args)]
pub(crate) struct MvArgs {
    pub(crate) from: String,
    pub(crate) to: String,
}

#[derive(Args)]
pub(crate) struct UploadArgs {
    /// Local file to send
    pub(crate) file: PathBuf,
    /// Destination folder path in the tree
    pub(crate) folder: String,
    /// Name in the store (defaults to the local file name)
    #[arg(long)]
    pub(crate) name: Option<String>,
}

#[derive(Args)]
pub(crate) struct StatusArgs {
    /// Max rows (defaults to the configured activity limit)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Only rows in this status
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct FileStatusArgs {
    pub(crate) document_id: String,
}

#[derive(Args)]
pub(crate) struct SyncArgs {
    /// Document ids to queue
    pub(crate) ids: Vec<String>,
    /// Queue every eligible document
    #[arg(long, conflicts_with = "ids")]
    pub(crate) all: bool,
    /// ingest, retry or resume (with --all)
    #[arg(long, requires = "all")]
    pub(crate) action: Option<String>,
}

#[derive(Args)]
pub(crate) struct WipeArgs {
    /// Document ids to wipe
    pub(crate) ids: Vec<String>,
    /// Wipe every learned document
    #[arg(long, conflicts_with = "ids")]
    pub(crate) all: bool,
}

#[derive(Args)]
pub(crate) struct AskArgs {
    #[arg(required = true, num_args = 1..)]
    pub(crate) question: Vec<String>,
    /// Emit the raw matches as JSON
    #[arg(long)]
    pub(crate) json: bool,
}
