//! Interactive conversion session driven by dialoguer prompts

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::converter::FileConverter;
use crate::output::{
    create_spinner, print_error, print_file_list, print_info, print_report, print_warning,
};
use crate::session::{ConversionSession, OutputOptions};
use crate::types::{ConversionJob, ConversionSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    AddFiles,
    SelectFiles,
    Convert,
    RemoveFile,
    ClearList,
    Quit,
}

impl Action {
    const ALL: [Action; 6] = [
        Action::AddFiles,
        Action::SelectFiles,
        Action::Convert,
        Action::RemoveFile,
        Action::ClearList,
        Action::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Action::AddFiles => "Add files",
            Action::SelectFiles => "Select files",
            Action::Convert => "Convert selected file",
            Action::RemoveFile => "Remove a file",
            Action::ClearList => "Clear the list",
            Action::Quit => "Quit",
        }
    }
}

pub async fn run_session(initial: &[PathBuf], settings: ConversionSettings) -> Result<()> {
    let theme = ColorfulTheme::default();
    let converter = FileConverter::with_settings(settings);
    let mut session = ConversionSession::new();

    if !initial.is_empty() {
        add_files(&mut session, initial);
        if session.files().len() == 1 {
            session.select(&[0]);
        }
    }

    loop {
        print_file_list(&session);

        let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let action = match choice {
            Some(index) => Action::ALL[index],
            None => Action::Quit,
        };

        match action {
            Action::AddFiles => prompt_add_files(&theme, &mut session)?,
            Action::SelectFiles => prompt_select_files(&theme, &mut session)?,
            Action::Convert => convert_selected(&theme, &session, &converter).await?,
            Action::RemoveFile => prompt_remove_file(&theme, &mut session)?,
            Action::ClearList => {
                if !session.files().is_empty()
                    && Confirm::with_theme(&theme)
                        .with_prompt("Remove all files from the list?")
                        .default(false)
                        .interact()?
                {
                    session.clear();
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

fn add_files(session: &mut ConversionSession, paths: &[PathBuf]) {
    let skipped = session.add_files(paths);
    let added = paths.len() - skipped.len();
    if added > 0 {
        print_info(&format!("Selected {} file(s).", added));
    }
    for path in skipped {
        print_warning(&format!("File not found - {}", path.display()));
    }
}

fn prompt_add_files(theme: &ColorfulTheme, session: &mut ConversionSession) -> Result<()> {
    let mut paths = Vec::new();
    loop {
        let line: String = Input::with_theme(theme)
            .with_prompt("File path (empty to finish)")
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        paths.push(PathBuf::from(line));
    }

    if paths.is_empty() {
        print_info("No files selected.");
    } else {
        add_files(session, &paths);
    }
    Ok(())
}

fn prompt_select_files(theme: &ColorfulTheme, session: &mut ConversionSession) -> Result<()> {
    if session.files().is_empty() {
        print_warning("The list is empty. Add files first.");
        return Ok(());
    }

    let items: Vec<String> = session.files().iter().map(|e| e.display_text()).collect();
    let defaults: Vec<bool> = (0..items.len())
        .map(|i| session.selected_indices().contains(&i))
        .collect();

    if let Some(chosen) = MultiSelect::with_theme(theme)
        .with_prompt("Select files (space to toggle, enter to confirm)")
        .items(&items)
        .defaults(&defaults)
        .interact_opt()?
    {
        session.select(&chosen);
        if let OutputOptions::SelectSingleFile = session.output_options() {
            print_info("Select a single file to see conversion options.");
        }
    }
    Ok(())
}

fn prompt_remove_file(theme: &ColorfulTheme, session: &mut ConversionSession) -> Result<()> {
    if session.files().is_empty() {
        return Ok(());
    }

    let items: Vec<String> = session.files().iter().map(|e| e.display_text()).collect();
    if let Some(index) = Select::with_theme(theme)
        .with_prompt("Remove which file?")
        .items(&items)
        .interact_opt()?
    {
        if let Some(entry) = session.remove_file(index) {
            print_info(&format!("Removed {}", entry.name));
        }
    }
    Ok(())
}

async fn convert_selected(
    theme: &ColorfulTheme,
    session: &ConversionSession,
    converter: &FileConverter,
) -> Result<()> {
    let token = match session.output_options() {
        OutputOptions::Formats(formats) => {
            let tokens: Vec<&str> = formats.iter().map(|f| f.token()).collect();
            match Select::with_theme(theme)
                .with_prompt("Output format")
                .items(&tokens)
                .default(0)
                .interact_opt()?
            {
                Some(index) => Some(tokens[index]),
                None => return Ok(()),
            }
        }
        other => other.placeholder(),
    };

    let job = match prepare_or_report(session, token, None) {
        Some(job) => job,
        None => return Ok(()),
    };

    let answer: String = Input::with_theme(theme)
        .with_prompt("Save converted file as (empty to cancel)")
        .with_initial_text(job.output.display().to_string())
        .allow_empty(true)
        .interact_text()?;
    let answer = answer.trim();
    if answer.is_empty() {
        print_info("Conversion cancelled by user.");
        return Ok(());
    }

    // Re-validate with the chosen path so the extension gets forced. The
    // input may have gone away while the prompt was open.
    let job = match prepare_or_report(session, token, Some(Path::new(answer))) {
        Some(job) => job,
        None => return Ok(()),
    };

    let spinner = create_spinner(&format!("Converting to {}...", job.format));
    let result = converter.convert(&job).await;
    spinner.finish_and_clear();

    match result {
        Ok(report) => print_report(&report),
        Err(e) => {
            log::error!("Conversion of {} failed: {}", job.input.display(), e);
            print_error("Conversion Failed", &e.to_string());
        }
    }
    Ok(())
}

/// Validate the selection; a rejection is shown to the user and the session
/// carries on.
fn prepare_or_report(
    session: &ConversionSession,
    token: Option<&str>,
    requested_output: Option<&Path>,
) -> Option<ConversionJob> {
    match session.prepare(token, requested_output) {
        Ok(job) => Some(job),
        Err(e) => {
            log::warn!("Conversion rejected: {}", e);
            print_error("Conversion Error", &e.to_string());
            None
        }
    }
}
