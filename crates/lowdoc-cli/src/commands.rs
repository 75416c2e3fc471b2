use std::io::Write;

use anyhow::Context;
use colored::Colorize;
use lowdoc_store::{DocPath, DocumentStore, StoreConfig};

use crate::cli::*;

pub fn run_command(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let Cli { command, root, format, .. } = cli;
    match command {
        Command::Config => cmd_config(&config, &format, out),
        command => {
            let store = DocumentStore::open_with(&root, config)
                .with_context(|| format!("cannot open store at {}", root.display()))?;
            run_store_command(&store, command, &format, out)
        }
    }
}

fn run_store_command(store: &DocumentStore, command: Command, format: &OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Command::Put(args) => cmd_put(store, args, out),
        Command::Get(args) => cmd_get(store, args, out),
        Command::Exists(args) => {
            let exists = store.document_exists(&parse_path(&args.path)?);
            print_flag(out, format, &args.path, "exists", exists)
        }
        Command::IsFolder(args) => {
            let is_folder = store.document_is_folder(&parse_path(&args.path)?);
            print_flag(out, format, &args.path, "is_folder", is_folder)
        }
        Command::Ls(args) => {
            let paths = store.document_paths(&parse_path(&args.folder)?, args.folders)?;
            print_paths(out, format, paths)
        }
        Command::CatAll(args) => cmd_cat_all(store, args, out),
        Command::Walk(args) => {
            let paths = store.enumerator(&parse_path(&args.folder)?, args.folders)?;
            print_paths(out, format, paths)
        }
        Command::Rm(args) => {
            store.delete_document(&parse_path(&args.path)?)?;
            writeln!(out, "{} Deleted {}", "✓".green(), args.path.yellow())?;
            Ok(())
        }
        Command::RmItem(args) => {
            store.delete_item(&parse_path(&args.path)?)?;
            writeln!(out, "{} Deleted {} recursively", "✓".green(), args.path.yellow())?;
            Ok(())
        }
        Command::Config => cmd_config(store.config(), format, out),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        config = config.with_max_depth(max_depth);
    }
    Ok(config)
}

fn parse_path(raw: &str) -> anyhow::Result<DocPath> {
    Ok(DocPath::new(raw)?)
}

fn cmd_put(store: &DocumentStore, args: PutArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let path = parse_path(&args.path)?;
    let data = match (&args.file, args.data) {
        (Some(file), _) => std::fs::read(file)
            .with_context(|| format!("cannot read {}", file.display()))?,
        (None, Some(data)) => data.into_bytes(),
        (None, None) => anyhow::bail!("nothing to write: pass --data or --file"),
    };
    if store.document_is_folder(&path) {
        anyhow::bail!("{} is a folder", path);
    }
    store.add_document(&path, &data)?;
    writeln!(out, "{} Wrote {} ({} bytes)", "✓".green().bold(), path.to_string().yellow(), data.len())?;
    Ok(())
}

fn cmd_get(store: &DocumentStore, args: PathArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let path = parse_path(&args.path)?;
    let data = store
        .document(&path)
        .with_context(|| format!("no document at {path}"))?;
    out.write_all(&data)?;
    Ok(())
}

fn cmd_cat_all(store: &DocumentStore, args: FolderArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    for data in store.documents(&parse_path(&args.folder)?)? {
        out.write_all(&data)?;
        if !data.ends_with(b"\n") {
            writeln!(out)?;
        }
    }
    Ok(())
}

fn cmd_config(config: &StoreConfig, format: &OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(config)?)?,
        OutputFormat::Text => write!(out, "{}", config.to_toml_string()?)?,
    }
    Ok(())
}

fn print_flag(out: &mut dyn Write, format: &OutputFormat, path: &str, key: &str, value: bool) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::json!({ "path": path, key: value }))?;
        }
        OutputFormat::Text => {
            let shown = if value { "yes".green() } else { "no".red() };
            writeln!(out, "{shown}")?;
        }
    }
    Ok(())
}

fn print_paths(out: &mut dyn Write, format: &OutputFormat, paths: impl IntoIterator<Item = DocPath>) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let paths: Vec<DocPath> = paths.into_iter().collect();
            writeln!(out, "{}", serde_json::to_string(&paths)?)?;
        }
        OutputFormat::Text => {
            for path in paths {
                writeln!(out, "{path}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run(root: &std::path::Path, args: &[&str]) -> anyhow::Result<String> {
        colored::control::set_override(false);
        let mut argv = vec!["lowdoc", "--root", root.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run_command(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["put", "a/b.txt", "--data", "hello"]).unwrap();
        assert_eq!(run(dir.path(), &["get", "a/b.txt"]).unwrap(), "hello");
    }

    #[test]
    fn put_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("source.bin");
        std::fs::write(&src, b"payload").unwrap();
        let root = dir.path().join("db");
        run(&root, &["put", "doc", "--file", src.to_str().unwrap()]).unwrap();
        assert_eq!(std::fs::read(root.join("doc")).unwrap(), b"payload");
    }

    #[test]
    fn put_requires_contents() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), &["put", "doc"]).is_err());
    }

    #[test]
    fn put_respects_max_depth() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), &["--max-depth", "1", "put", "a/b/c", "--data", "x"]).unwrap_err();
        assert!(err.to_string().contains("max depth"));
        run(dir.path(), &["--max-depth", "1", "put", "a/c", "--data", "x"]).unwrap();
    }

    #[test]
    fn get_missing_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), &["get", "missing"]).is_err());
    }

    #[test]
    fn invalid_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), &["get", "../etc/passwd"]).is_err());
    }

    #[test]
    fn exists_and_is_folder_json() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["put", "f/doc", "--data", "d"]).unwrap();
        let out = run(dir.path(), &["--format", "json", "is-folder", "f"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["is_folder"], true);
        assert_eq!(run(dir.path(), &["exists", "nope"]).unwrap().trim(), "no");
    }

    #[test]
    fn ls_and_walk() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["put", "f/x.txt", "--data", "x"]).unwrap();
        run(dir.path(), &["put", "f/g/z.txt", "--data", "z"]).unwrap();

        let ls = run(dir.path(), &["ls", "f", "--folders"]).unwrap();
        assert_eq!(ls.lines().collect::<Vec<_>>(), vec!["f/g", "f/x.txt"]);

        let walk = run(dir.path(), &["--format", "json", "walk", "f"]).unwrap();
        let mut walked: Vec<String> = serde_json::from_str(&walk).unwrap();
        walked.sort();
        assert_eq!(walked, vec!["f/g/z.txt", "f/x.txt"]);
    }

    #[test]
    fn cat_all_prints_documents() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["put", "f/a", "--data", "alpha"]).unwrap();
        run(dir.path(), &["put", "f/b", "--data", "beta\n"]).unwrap();
        assert_eq!(run(dir.path(), &["cat-all", "f"]).unwrap(), "alpha\nbeta\n");
    }

    #[test]
    fn rm_and_rm_item() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["put", "f/g/z.txt", "--data", "z"]).unwrap();
        assert!(run(dir.path(), &["rm", "f/g"]).is_err());
        run(dir.path(), &["rm-item", "f/g"]).unwrap();
        assert!(!dir.path().join("f/g").exists());
        assert!(run(dir.path(), &["rm-item", ""]).is_err());
    }

    #[test]
    fn config_from_file_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("lowdoc.toml");
        std::fs::write(&config, "max_depth = 4\nmissing_folder = \"error\"\n").unwrap();
        let out = run(
            dir.path(),
            &["--config", config.to_str().unwrap(), "--max-depth", "2", "--format", "json", "config"],
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["max_depth"], 2);
        assert_eq!(value["missing_folder"], "error");
    }
}
