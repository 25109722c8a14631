//! Line-oriented front end over the application context

use app_core::{
    describe_plan, AppContext, AppError, Command, NoOpReason, ParseError, RenameOutcome, TagGroup, TagSet, HELP,
};
use std::io::{self, BufRead, Write};

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Reads commands from `input`, writes feedback to `output`
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self, ctx: &mut AppContext) -> anyhow::Result<()> {
        writeln!(self.output, "Photo Renamer. Type 'help' for commands.")?;
        self.show_current(ctx)?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            match Command::parse(&line) {
                Ok(command) => {
                    tracing::debug!("Command: {:?}", command);
                    if self.execute(ctx, command)? == Flow::Quit {
                        break;
                    }
                }
                Err(ParseError::Empty) => {}
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }

        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Yes/no question; anything but y/yes is a no
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{} [y/N] ", question)?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn execute(&mut self, ctx: &mut AppContext, command: Command) -> anyhow::Result<Flow> {
        match command {
            Command::List => {
                let current = ctx.navigation.current_index();
                for (i, name) in ctx.navigation.images().iter().enumerate() {
                    let marker = if i == current { '*' } else { ' ' };
                    writeln!(self.output, "{} {:>4} {}", marker, i + 1, name)?;
                }
                if ctx.navigation.images().is_empty() {
                    writeln!(self.output, "No images in {}", ctx.navigation.folder().display())?;
                }
            }
            Command::Next => {
                ctx.navigation.next();
                self.show_current(ctx)?;
            }
            Command::Prev => {
                ctx.navigation.prev();
                self.show_current(ctx)?;
            }
            Command::Open(folder) => match ctx.change_folder(&folder) {
                Ok(()) => self.show_current(ctx)?,
                Err(e) => writeln!(self.output, "{}", e.user_message())?,
            },
            Command::Refresh => match ctx.refresh() {
                Ok(()) => self.show_current(ctx)?,
                Err(e) => writeln!(self.output, "{}", e.user_message())?,
            },
            Command::Tabs => self.show_tabs(ctx)?,
            Command::Check { tab, tag } => self.with_tag_set(ctx, tab, |set| set.set_checked(&tag, true))?,
            Command::Uncheck { tab, tag } => self.with_tag_set(ctx, tab, |set| set.set_checked(&tag, false))?,
            Command::Toggle { tab, tag } => self.with_tag_set(ctx, tab, |set| set.toggle(&tag).is_some())?,
            Command::AddTag { tab, tag } => self.with_tag_set(ctx, tab, |set| set.add(tag))?,
            Command::RemoveTag { tab, tag } => self.with_tag_set(ctx, tab, |set| set.remove(&tag))?,
            Command::Pattern { tab, pattern } => match ctx.tags.group_mut(tab) {
                Some(TagGroup::Date(date)) => {
                    date.set_pattern(pattern);
                    self.show_tabs(ctx)?;
                }
                Some(TagGroup::Tags(_)) => writeln!(self.output, "Tab {} is not a date tab", tab + 1)?,
                None => self.no_such_tab(tab)?,
            },
            Command::NewTab { kind, label } => {
                ctx.tags.add_group(kind, label);
                self.show_tabs(ctx)?;
            }
            Command::CloseTab { tab } => {
                let Some(label) = ctx.tags.group(tab).map(|g| g.label().to_string()) else {
                    self.no_such_tab(tab)?;
                    return Ok(Flow::Continue);
                };
                if !ctx.config.confirm_delete || self.confirm(&format!("Remove tab '{}'?", label))? {
                    ctx.tags.remove_group(tab);
                    self.show_tabs(ctx)?;
                }
            }
            Command::Label { tab, label } => match ctx.tags.group_mut(tab) {
                Some(group) => {
                    group.set_label(label);
                    self.show_tabs(ctx)?;
                }
                None => self.no_such_tab(tab)?,
            },
            Command::Preview => match ctx.preview() {
                Some(plan) => writeln!(self.output, "{}", describe_plan(&plan))?,
                None => writeln!(self.output, "No image selected")?,
            },
            Command::Rename => {
                match ctx.rename_current() {
                    RenameOutcome::Renamed { from, to } => writeln!(
                        self.output,
                        "Renamed {} -> {}",
                        file_name(&from),
                        file_name(&to)
                    )?,
                    RenameOutcome::NoOp(NoOpReason::NoSelection) => writeln!(self.output, "No image selected")?,
                    RenameOutcome::NoOp(NoOpReason::NoTokens) => writeln!(self.output, "No tags checked")?,
                    RenameOutcome::NoOp(NoOpReason::Unchanged) => writeln!(self.output, "Name unchanged")?,
                    RenameOutcome::Failed(e) => writeln!(self.output, "Rename failed: {}", e)?,
                }
                self.show_current(ctx)?;
            }
            Command::Delete => {
                let Some(file) = ctx.current_file() else {
                    writeln!(self.output, "No image selected")?;
                    return Ok(Flow::Continue);
                };
                let question = format!("Delete {}?", file_name(&file));
                if !ctx.config.confirm_delete || self.confirm(&question)? {
                    match ctx.discard_current() {
                        Ok(path) => writeln!(self.output, "Deleted {}", file_name(&path))?,
                        Err(e) => writeln!(self.output, "{}", e.user_message())?,
                    }
                    self.show_current(ctx)?;
                }
            }
            Command::Rotate(rotation) => match ctx.rotate_current(rotation) {
                Ok(path) => writeln!(self.output, "Rotated {}", file_name(&path))?,
                Err(e) => writeln!(self.output, "{}", e.user_message())?,
            },
            Command::Help => writeln!(self.output, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn with_tag_set(
        &mut self,
        ctx: &mut AppContext,
        tab: usize,
        edit: impl FnOnce(&mut TagSet) -> bool,
    ) -> io::Result<()> {
        match ctx.tags.group_mut(tab) {
            Some(TagGroup::Tags(set)) => {
                if !edit(set) {
                    writeln!(self.output, "Nothing changed in '{}'", set.label())?;
                }
                self.show_tabs(ctx)
            }
            Some(TagGroup::Date(_)) => writeln!(self.output, "Tab {} is a date tab", tab + 1),
            None => self.no_such_tab(tab),
        }
    }

    fn no_such_tab(&mut self, tab: usize) -> io::Result<()> {
        writeln!(self.output, "{}", AppError::NoSuchGroup(tab + 1).user_message())
    }

    fn show_current(&mut self, ctx: &AppContext) -> io::Result<()> {
        let nav = &ctx.navigation;
        match nav.current_name() {
            Some(name) => writeln!(
                self.output,
                "[{}/{}] {}",
                nav.current_index() + 1,
                nav.images().len(),
                name
            ),
            None => writeln!(self.output, "No images in {}", nav.folder().display()),
        }
    }

    fn show_tabs(&mut self, ctx: &AppContext) -> io::Result<()> {
        for (i, group) in ctx.tags.groups().iter().enumerate() {
            match group {
                TagGroup::Date(date) => {
                    writeln!(self.output, "{}. {} (date): \"{}\"", i + 1, date.label(), date.pattern())?;
                }
                TagGroup::Tags(set) => {
                    let tags: Vec<String> = set
                        .tags()
                        .iter()
                        .map(|t| format!("[{}] {}", if t.checked { 'x' } else { ' ' }, t.name))
                        .collect();
                    writeln!(self.output, "{}. {}: {}", i + 1, set.label(), tags.join("  "))?;
                }
            }
        }
        Ok(())
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
