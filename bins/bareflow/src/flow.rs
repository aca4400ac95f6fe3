//! The interactive build flow
//!
//! Stage order: SelectPlatform → SelectMode → AskVersion (bump + prebuild)
//! → AskClean → (iOS: PodInstall) → ChooseAction → Execute → optionally
//! open the output directory. Every stage completes before the next one
//! starts; any toolchain failure aborts the whole run.

use bareflow_android::artifacts::{self, PackageKind};
use bareflow_android::gradle;
use bareflow_cli::output::{Status, format_duration};
use bareflow_cli::progress;
use bareflow_cli::prompt;
use bareflow_core::config::{Config, IosConfig};
use bareflow_core::error::{Error, ErrorCode, Result, ResultExt};
use bareflow_core::platform::{Mode, Platform};
use bareflow_core::process::CommandResult;
use bareflow_ios::{pods, xcode};
use bareflow_rn::{manifest, prebuild, run as rn_run};
use owo_colors::OwoColorize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Inputs resolved before the flow starts
pub struct FlowOptions {
    pub platform: Option<Platform>,
    pub mode: Option<Mode>,
    pub manifest: Option<PathBuf>,
    pub config: Config,
}

/// What to do once the prompts are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildAction {
    Run,
    Package,
}

impl fmt::Display for BuildAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildAction::Run => write!(f, "Run on device/emulator"),
            BuildAction::Package => write!(f, "Generate package"),
        }
    }
}

/// A fully answered set of prompts
#[derive(Debug)]
struct BuildRequest {
    platform: Platform,
    mode: Mode,
    version_name: String,
    should_clean: bool,
    action: BuildAction,
    package_kind: Option<PackageKind>,
}

struct ProjectPaths {
    root: PathBuf,
    manifest: PathBuf,
    android_dir: PathBuf,
    ios_dir: PathBuf,
}

/// Drive the whole interactive flow
pub fn run(opts: FlowOptions) -> Result<()> {
    Status::header("React Native/Expo bare-workflow build helper");
    println!();

    let schema = &opts.config.schema;
    let root = PathBuf::from(".");
    let paths = ProjectPaths {
        manifest: opts
            .manifest
            .clone()
            .unwrap_or_else(|| root.join(&schema.project.manifest)),
        android_dir: root.join(&schema.project.android_dir),
        ios_dir: root.join(&schema.project.ios_dir),
        root,
    };

    let platform = match opts.platform {
        Some(platform) => {
            println!("{} {}", "✔".green(), platform);
            platform
        }
        None => prompt::select("Select the platform:", Platform::ALL.to_vec())?,
    };
    let mode = match opts.mode {
        Some(mode) => {
            println!("{} {}", "✔".green(), mode);
            mode
        }
        None => prompt::select("Select the build type:", Mode::ALL.to_vec())?,
    };

    let version_name = ask_version(&paths, platform)?;

    let should_clean = prompt::confirm("Clean the previous build cache?")?;
    if should_clean {
        clean(platform, &paths)?;
    }

    if platform == Platform::Ios {
        pod_install(&paths.ios_dir)?;
    }

    let action = resolve_action(mode, || {
        prompt::select(
            "Run on a device or generate a file?",
            vec![BuildAction::Run, BuildAction::Package],
        )
    })?;

    let package_kind = match (action, platform) {
        (BuildAction::Package, Platform::Android) => {
            Some(prompt::select("Generate APK or AAB?", PackageKind::ALL.to_vec())?)
        }
        _ => None,
    };

    let request = BuildRequest {
        platform,
        mode,
        version_name,
        should_clean,
        action,
        package_kind,
    };

    execute(&request, &paths, &schema.ios)
}

/// Debug always runs directly; release asks
fn resolve_action(
    mode: Mode,
    choose: impl FnOnce() -> Result<BuildAction>,
) -> Result<BuildAction> {
    match mode {
        Mode::Debug => Ok(BuildAction::Run),
        Mode::Release => choose(),
    }
}

fn execute(request: &BuildRequest, paths: &ProjectPaths, ios_config: &IosConfig) -> Result<()> {
    Status::detail(&format!(
        "{} {} · version {}{}",
        request.mode,
        request.platform,
        request.version_name,
        if request.should_clean { " · cleaned" } else { "" }
    ));
    println!();

    match request.action {
        BuildAction::Run => run_on_device(paths, request.platform, request.mode),
        BuildAction::Package => match request.platform {
            Platform::Android => {
                let kind = request.package_kind.ok_or_else(|| {
                    Error::new(ErrorCode::Internal, "package kind not chosen for Android")
                })?;
                package_android(paths, kind)
            }
            Platform::Ios => package_ios(paths, ios_config),
        },
    }
}

/// AskVersion stage: prompt, bump the manifest, regenerate native projects
///
/// The prebuild runs right after the write; when it fails the manifest
/// stays bumped. That is the documented behavior, not a bug.
fn ask_version(paths: &ProjectPaths, platform: Platform) -> Result<String> {
    let current = manifest::AppManifest::load(&paths.manifest)?
        .version_name()
        .unwrap_or_default()
        .to_string();

    let entered = prompt::input("Enter the new versionName", &current)?;
    let entered = entered.trim().to_string();
    if entered.is_empty() {
        return Err(Error::empty_input("versionName"));
    }
    if semver::Version::parse(&entered).is_err() {
        Status::warning(&format!("\"{}\" is not a semver version name", entered));
    }

    let outcome = manifest::bump_version(&paths.manifest, &entered)?;
    Status::success(&format!(
        "app.json updated: versionName={}, versionCode={}",
        outcome.applied_version_name, outcome.new_version_code
    ));

    let pb = progress::spinner(&format!(
        "Running expo prebuild --platform {}...",
        platform.as_str()
    ));
    match prebuild::prebuild(&paths.root, platform) {
        Ok(_) => progress::finish_success(&pb, "Expo prebuild complete"),
        Err(err) => {
            progress::finish_clear(&pb);
            return Err(err);
        }
    }
    println!();

    Ok(outcome.applied_version_name)
}

type CleanRunner = fn(&Path) -> Result<CommandResult>;

/// Clean command registry; a platform without one is a warning, not an error
fn clean_runner(platform: Platform) -> Option<CleanRunner> {
    match platform {
        Platform::Android => Some(gradle::clean),
        Platform::Ios => Some(xcode::clean),
    }
}

fn clean(platform: Platform, paths: &ProjectPaths) -> Result<()> {
    let Some(runner) = clean_runner(platform) else {
        Status::warning("No clean command registered for this platform.");
        return Ok(());
    };

    let dir = match platform {
        Platform::Android => &paths.android_dir,
        Platform::Ios => &paths.ios_dir,
    };

    let pb = progress::spinner("Cleaning the previous build...");
    match runner(dir) {
        Ok(_) => {
            progress::finish_success(&pb, "Cache cleaned");
            println!();
            Ok(())
        }
        Err(err) => {
            progress::finish_clear(&pb);
            Err(err)
        }
    }
}

fn pod_install(ios_dir: &Path) -> Result<()> {
    let pb = progress::spinner("Running pod install...");
    match pods::install(ios_dir) {
        Ok(_) => {
            progress::finish_success(&pb, "pod install complete");
            println!();
            Ok(())
        }
        Err(err) => {
            progress::finish_clear(&pb);
            Err(err).with_suggestion("Check the Podfile and your CocoaPods installation")
        }
    }
}

fn run_on_device(paths: &ProjectPaths, platform: Platform, mode: Mode) -> Result<()> {
    println!("{}", format!("Starting the {} build...", platform).cyan());
    Status::detail("This may take a few minutes.");
    println!();

    let started = Instant::now();
    rn_run::run_app(&paths.root, platform, mode)?;

    println!();
    Status::success(&format!(
        "{} build finished in {}",
        platform,
        format_duration(started.elapsed())
    ));
    Ok(())
}

fn package_android(paths: &ProjectPaths, kind: PackageKind) -> Result<()> {
    println!("{}", format!("Generating {}...", kind).cyan());
    Status::detail("This may take a few minutes.");
    println!();

    gradle::package(&paths.android_dir, kind)?;

    let artifact = artifacts::artifact_path(&paths.android_dir, kind);
    if artifact.exists() {
        println!();
        Status::success(&format!("{} generated: {}", kind, artifact.display()));
        let dir = artifact.parent().unwrap_or(&paths.android_dir).to_path_buf();
        offer_open_directory(&dir)
    } else {
        Status::error(&format!("{} not found at {}", kind, artifact.display()));
        Ok(())
    }
}

fn package_ios(paths: &ProjectPaths, ios_config: &IosConfig) -> Result<()> {
    println!("{}", "Generating IPA...".cyan());
    Status::warning("Make sure the Xcode project has valid signing certificates configured.");
    println!();

    let workspace = xcode::find_workspace(&paths.ios_dir)?;
    let workspace_name = workspace
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let scheme = xcode::scheme_for(&workspace, &ios_config.scheme);

    xcode::archive(&paths.ios_dir, &workspace_name, &scheme)?;
    xcode::export_archive(&paths.ios_dir, &ios_config.export_options)?;

    let export_dir = paths.ios_dir.join(xcode::EXPORT_PATH);
    println!();
    Status::success(&format!("IPA exported to {}", export_dir.display()));
    offer_open_directory(&export_dir)
}

/// Offer to open the output directory; failing to open is non-fatal
fn offer_open_directory(dir: &Path) -> Result<()> {
    if prompt::confirm("Open the output directory?")? {
        if let Err(err) = open::that(dir) {
            Status::error(&format!("Failed to open {}: {}", dir.display(), err));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_never_consults_the_action_prompt() {
        let action = resolve_action(Mode::Debug, || {
            panic!("the action prompt must not run in debug mode")
        })
        .unwrap();
        assert_eq!(action, BuildAction::Run);
    }

    #[test]
    fn test_release_uses_the_chosen_action() {
        let action = resolve_action(Mode::Release, || Ok(BuildAction::Package)).unwrap();
        assert_eq!(action, BuildAction::Package);
    }

    #[test]
    fn test_release_propagates_prompt_cancellation() {
        let err = resolve_action(Mode::Release, || Err(Error::cancelled())).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_clean_runner_registered_for_both_platforms() {
        assert!(clean_runner(Platform::Android).is_some());
        assert!(clean_runner(Platform::Ios).is_some());
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(BuildAction::Run.to_string(), "Run on device/emulator");
        assert_eq!(BuildAction::Package.to_string(), "Generate package");
    }
}
