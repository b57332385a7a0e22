use std::io;
use std::path::Path;
use std::process::Command;

/// Ask the desktop's file manager to show `path`.
///
/// macOS and Windows select the file itself; elsewhere the containing
/// directory is opened.
pub fn reveal_in_file_manager(path: &Path) -> io::Result<()> {
    let mut command = reveal_command(path);
    tracing::info!(?command, "revealing output");
    command.spawn().map(|_| ())
}

#[cfg(target_os = "macos")]
fn reveal_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg("-R").arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn reveal_command(path: &Path) -> Command {
    let mut cmd = Command::new("explorer");
    let mut arg = std::ffi::OsString::from("/select,");
    arg.push(path);
    cmd.arg(arg);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn reveal_command(path: &Path) -> Command {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut cmd = Command::new("xdg-open");
    cmd.arg(dir);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    #[test]
    fn test_reveal_opens_parent_directory() {
        let cmd = reveal_command(Path::new("/tmp/out/file_info.csv"));
        assert_eq!(cmd.get_program(), "xdg-open");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec![std::ffi::OsStr::new("/tmp/out")]);
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    #[test]
    fn test_reveal_bare_file_name_opens_cwd() {
        let cmd = reveal_command(Path::new("file_info.csv"));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec![std::ffi::OsStr::new(".")]);
    }
}
