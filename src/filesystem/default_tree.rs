use super::node::Directory;

pub const HOME_DIR: &str = "/home/user";

const README: &str = r#"# Welcome to NebulaOS

Type 'help' in the Terminal to see available commands.

Try:
- ls, cd, pwd
- mkdir sandbox && cd sandbox
- touch hello.txt && echo "hi" > hello.txt
- cat hello.txt
- js 1 + 2 * 3
"#;

const NOTES_JS: &str = r#"console.log("NebulaOS ready")"#;

/// Tree used on first start and whenever persisted state cannot be used.
pub fn default_tree() -> Directory {
    Directory::new().with_dir(
        "home",
        Directory::new().with_dir(
            "user",
            Directory::new()
                .with_file("README.md", README)
                .with_file("notes.js", NOTES_JS),
        ),
    )
}
