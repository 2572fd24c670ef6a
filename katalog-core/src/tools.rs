//! Typed invocations of the external layout and PDF tools

use crate::error::ToolError;
use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One external program call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    expected_output: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            expected_output: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// File the program must leave behind for the call to count as successful
    pub fn expect_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.expected_output = Some(path.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn expected_output(&self) -> Option<&Path> {
        self.expected_output.as_deref()
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Executes tool commands
pub trait ToolRunner {
    fn run(&self, command: &ToolCommand) -> Result<(), ToolError>;

    /// Whether commands actually run, so their outputs can be post-processed
    fn executes(&self) -> bool {
        true
    }
}

/// Runs commands as child processes, waiting for each to finish
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> Result<(), ToolError> {
        tracing::debug!("Running {}", command);

        let mut process = Command::new(&command.program);
        process.args(&command.args);
        if let Some(dir) = &command.working_dir {
            process.current_dir(dir);
        }

        let output = process.output().map_err(|source| ToolError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                program: command.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if let Some(expected) = &command.expected_output {
            let expected = match &command.working_dir {
                Some(dir) if expected.is_relative() => dir.join(expected),
                _ => expected.clone(),
            };
            if !expected.exists() {
                return Err(ToolError::MissingOutput {
                    program: command.program.clone(),
                    path: expected,
                });
            }
        }

        Ok(())
    }
}

/// Records commands instead of running them
#[derive(Debug, Default)]
pub struct DryRun {
    commands: RefCell<Vec<ToolCommand>>,
}

impl DryRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands seen so far
    pub fn commands(&self) -> Vec<ToolCommand> {
        self.commands.borrow().clone()
    }
}

impl ToolRunner for DryRun {
    fn run(&self, command: &ToolCommand) -> Result<(), ToolError> {
        tracing::info!("Would run: {}", command);
        self.commands.borrow_mut().push(command.clone());
        Ok(())
    }

    fn executes(&self) -> bool {
        false
    }
}

/// Locations of the external tools and helper scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Directory commands run in; relative script paths resolve against it
    pub root: PathBuf,
    pub scribus: String,
    pub python: String,
    pub ghostscript: String,
    pub scripts_dir: PathBuf,
    pub generator: PathBuf,
}

impl Toolchain {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scribus: "scribus".to_string(),
            python: ".env/bin/python".to_string(),
            ghostscript: "gs".to_string(),
            scripts_dir: PathBuf::from("scripts/python"),
            generator: PathBuf::from("vendor/berteh/scribusgenerator/ScribusGeneratorCLI.py"),
        }
    }

    fn scribus_script(&self, script: &str) -> ToolCommand {
        ToolCommand::new(&self.scribus)
            .args(["-g", "-ns", "-py"])
            .path_arg(&self.scripts_dir.join(script))
            .current_dir(&self.root)
    }

    /// Fill a template with CSV rows, producing `<output_dir>/<name>.sla`
    pub fn generate_partial(
        &self,
        csv: &Path,
        output_dir: &Path,
        name: &str,
        template: &Path,
    ) -> ToolCommand {
        ToolCommand::new(&self.python)
            .path_arg(&self.generator)
            .arg("--single")
            .arg("-c")
            .path_arg(csv)
            .arg("-o")
            .path_arg(output_dir)
            .arg("-n")
            .arg(name)
            .path_arg(template)
            .current_dir(&self.root)
            .expect_output(output_dir.join(format!("{}.sla", name)))
    }

    /// Delete one page of a layout document in place
    pub fn delete_page(&self, document: &Path, page: u32) -> ToolCommand {
        self.scribus_script("delete_page.py")
            .path_arg(document)
            .arg("--page")
            .arg(page.to_string())
    }

    /// Import all pages of another document after the given page
    pub fn import_pages(
        &self,
        document: &Path,
        import: &Path,
        page: u32,
        master_page: &str,
    ) -> ToolCommand {
        self.scribus_script("import_pages.py")
            .path_arg(document)
            .path_arg(import)
            .arg("--page")
            .arg(page.to_string())
            .arg("--masterpage")
            .arg(master_page)
    }

    /// Render a layout document to PDF
    pub fn build_pdf(&self, input: &Path, output: &Path) -> ToolCommand {
        ToolCommand::new(&self.scribus)
            .args(["-g", "-py"])
            .path_arg(&self.scripts_dir.join("build_pdf.py"))
            .arg("--input")
            .path_arg(input)
            .arg("--output")
            .path_arg(output)
            .current_dir(&self.root)
            .expect_output(output)
    }

    /// Rewrite a PDF with downsampled images and subset fonts
    pub fn optimize_pdf(&self, input: &Path, output: &Path, resolution: u32) -> ToolCommand {
        ToolCommand::new(&self.ghostscript)
            .args([
                "-sDEVICE=pdfwrite",
                "-dCompatibilityLevel=1.4",
                "-dConvertCMYKImagesToRGB=true",
                "-dSubsetFonts=true",
                "-dCompressFonts=true",
                "-dPDFSETTINGS=/printer",
                "-dDownsampleColorImages=true",
                "-dDownsampleGrayImages=true",
                "-dDownsampleMonoImages=true",
            ])
            .arg(format!("-dColorImageResolution={}", resolution))
            .arg(format!("-dGrayImageResolution={}", resolution))
            .arg(format!("-dMonoImageResolution={}", resolution))
            .args(["-dNOPAUSE", "-dQUIET", "-dBATCH"])
            .arg(format!("-sOutputFile={}", output.display()))
            .args(["-c", ".setpdfwrite", "-f"])
            .path_arg(input)
            .current_dir(&self.root)
            .expect_output(output)
    }
}
