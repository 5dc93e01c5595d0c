use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Games listed per page; the digits 8, 9 and 0 are reserved for navigation.
pub const PAGE_SIZE: usize = 7;

/// What the player asked for at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Choice {
    Exit,
    Previous,
    Next,
    Play(PathBuf),
    Invalid,
}

/// # Menu
/// A paged list of the roms in a games directory.
pub struct Menu {
    games: Vec<PathBuf>,
    page: usize,
}

impl Menu {
    pub fn new(mut games: Vec<PathBuf>) -> Self {
        games.sort();
        Menu { games, page: 0 }
    }

    /// Lists every regular file in `dir`.
    pub fn scan(dir: &Path) -> io::Result<Self> {
        let mut games = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                games.push(path);
            }
        }
        Ok(Menu::new(games))
    }

    pub fn page_count(&self) -> usize {
        ((self.games.len() + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
    }

    /// The games on the current page.
    pub fn entries(&self) -> &[PathBuf] {
        let start = (self.page * PAGE_SIZE).min(self.games.len());
        let end = (start + PAGE_SIZE).min(self.games.len());
        &self.games[start..end]
    }

    fn has_previous(&self) -> bool {
        self.page > 0
    }

    fn has_next(&self) -> bool {
        self.page + 1 < self.page_count()
    }

    /// The current page as it is shown at the prompt.
    pub fn render(&self) -> String {
        let mut lines = vec![
            "0. Exit".to_string(),
            format!("Page {}/{}", self.page + 1, self.page_count()),
        ];
        for (n, game) in self.entries().iter().enumerate() {
            let name = game
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default();
            lines.push(format!("{}. {}", n + 1, name));
        }
        if self.has_previous() {
            lines.push("8. Previous Page".to_string());
        }
        if self.has_next() {
            lines.push("9. Next Page".to_string());
        }
        lines.join("\n")
    }

    /// Interprets one line of input, turning the page if asked.
    pub fn choose(&mut self, input: &str) -> Choice {
        match input.trim() {
            "0" => Choice::Exit,
            "8" if self.has_previous() => {
                self.page -= 1;
                Choice::Previous
            }
            "9" if self.has_next() => {
                self.page += 1;
                Choice::Next
            }
            other => match other.parse::<usize>() {
                Ok(n) if (1..=self.entries().len()).contains(&n) => {
                    Choice::Play(self.entries()[n - 1].clone())
                }
                _ => Choice::Invalid,
            },
        }
    }
}
