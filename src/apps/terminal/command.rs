/// A parsed terminal command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    Ls(Option<String>),
    Cd(Option<String>),
    Pwd,
    Cat(String),
    Echo {
        text: String,
        redirect: Option<String>,
    },
    Touch(String),
    Mkdir(String),
    Rm(String),
    Clear,
    Sudo,
    Exit,
    Unknown(String),
}

const REDIRECT: &str = " > ";

impl Command {
    /// Splits on whitespace; the first word picks the command. Commands that
    /// need a path and get none receive an empty one, which the terminal
    /// resolves to its working directory.
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Command::Empty;
        };
        let args = words.map(str::to_owned).collect::<Vec<_>>();
        let first = || args.first().cloned();
        let path = || first().unwrap_or_default();

        match name {
            "help" => Command::Help,
            "ls" => Command::Ls(first()),
            "cd" => Command::Cd(first()),
            "pwd" => Command::Pwd,
            "cat" => Command::Cat(path()),
            "echo" => Self::parse_echo(&args.join(" ")),
            "touch" => Command::Touch(path()),
            "mkdir" => Command::Mkdir(path()),
            "rm" => Command::Rm(
                args.iter()
                    .find(|arg| !arg.starts_with('-'))
                    .cloned()
                    .unwrap_or_default(),
            ),
            "clear" => Command::Clear,
            "sudo" => Command::Sudo,
            "exit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        }
    }

    /// `echo text > file` redirects into the file named after the last ` > `.
    fn parse_echo(joined: &str) -> Self {
        match joined.rsplit_once(REDIRECT) {
            Some((text, file)) if !file.is_empty() => Command::Echo {
                text: text.to_string(),
                redirect: Some(file.to_string()),
            },
            _ => Command::Echo {
                text: joined.to_string(),
                redirect: None,
            },
        }
    }
}
