use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::objects::object_id::ObjectId;

const LOG_ENV: &str = "TWIG_LOG";

#[derive(Parser)]
#[command(
    name = "twig",
    version,
    about = "A minimal content-addressed version control system",
    long_about = "twig snapshots a working directory into content-addressed blobs, \
    trees and commits stored under a local metadata directory, and can restore \
    any recorded commit back into the working directory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Stage files",
        long_about = "This command stores the content of the given files as blobs and records them in the index. \
        Directories are staged recursively."
    )]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit from the index",
        long_about = "This command snapshots the index as a tree hierarchy and records it as a commit on top of HEAD."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(
            short,
            long,
            env = "TWIG_AUTHOR_NAME",
            default_value = "anonymous",
            help = "The commit author"
        )]
        author: String,
    },
    #[command(
        name = "checkout",
        about = "Restore the working directory from a commit",
        long_about = "This command replaces the working directory with the snapshot recorded by the given commit. \
        Files whose objects are missing are skipped and reported."
    )]
    Checkout {
        #[arg(index = 1, help = "The commit SHA to check out")]
        commit: String,
    },
    #[command(name = "log", about = "Show the commit history from HEAD")]
    Log,
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object store",
        long_about = "This command hashes a file as a blob and can write it to the object store. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object store")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
    #[command(name = "write-tree", about = "Write the index as a tree hierarchy")]
    WriteTree,
    #[command(
        name = "treeify",
        about = "Snapshot a directory into trees without staging it"
    )]
    Treeify {
        #[arg(index = 1, help = "The directory to snapshot")]
        dir: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_repository(path: Option<&PathBuf>) -> Result<Repository> {
    let path = match path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };

    Repository::new(&path, Box::new(std::io::stdout()))
        .with_context(|| format!("cannot open repository at {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            open_repository(path.as_ref())?.init().await?;
        }
        Commands::Add { paths } => {
            open_repository(None)?.add(paths).await?;
        }
        Commands::Commit { message, author } => {
            open_repository(None)?.commit(author, message).await?;
        }
        Commands::Checkout { commit } => {
            let commit_id = ObjectId::try_parse(commit)?;
            open_repository(None)?.checkout(&commit_id).await?;
        }
        Commands::Log => {
            let repository = open_repository(None)?;

            for (commit_id, commit) in repository.log()? {
                let mut writer = repository.writer();
                writeln!(writer, "commit {}", commit_id)?;
                writeln!(writer, "Author: {}", commit.author())?;
                writeln!(writer, "Date:   {}", commit.date().to_rfc2822())?;
                writeln!(writer)?;
                writeln!(writer, "    {}", commit.summary())?;
                writeln!(writer)?;
            }
        }
        Commands::HashObject { write, file } => {
            open_repository(None)?.hash_object(file, *write)?;
        }
        Commands::CatFile { sha } => {
            let object_id = ObjectId::try_parse(sha)?;
            open_repository(None)?.cat_file(&object_id)?;
        }
        Commands::WriteTree => {
            open_repository(None)?.write_tree().await?;
        }
        Commands::Treeify { dir } => {
            open_repository(None)?.treeify(dir)?;
        }
    }

    Ok(())
}
