use std::{io, path::PathBuf};

use anyhow::Context;
use miette::Report;

const COMPILE_CONTEXT: &str = "while compiling blueprint";
const FILE_READ_CONTEXT: &str = "while reading";
const FILE_PARSE_CONTEXT: &str = "while parsing";

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    ReadFile {
        path: PathBuf,
        source: io::Error,
    },
    ParseFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    Core(ddlgram_core::Error),
}

impl From<ddlgram_core::Error> for CliError {
    fn from(value: ddlgram_core::Error) -> Self {
        Self::Core(value)
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::ReadFile { path, source } => {
            let context = format!("{FILE_READ_CONTEXT} `{}`", path.display());
            let report = report_with_context(source, context);
            format!("[io] {report}")
        }
        CliError::ParseFile { path, source } => {
            let context = format!("{FILE_PARSE_CONTEXT} `{}`", path.display());
            let report = report_with_context(source, context);
            format!("[parse] {report}")
        }
        CliError::Core(source) => {
            let category = core_category(&source);
            let report = report_with_context(source, COMPILE_CONTEXT);
            format!("[{category}] {report}")
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let context = context.into();
    let anyhow_error = std::result::Result::<(), E>::Err(source)
        .context(context)
        .expect_err("context wrapping must produce an error");
    miette::miette!("{anyhow_error:#}")
}

fn core_category(error: &ddlgram_core::Error) -> &'static str {
    match error {
        ddlgram_core::Error::Compile(_) => "compile",
        ddlgram_core::Error::Catalogue(_) => "catalogue",
    }
}
