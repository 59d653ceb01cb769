use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use provider_fetcher::identity::APP_DIR;
use provider_fetcher::models::message::Message;

pub fn ensure_session_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    let session_dir = home_dir.join(".config").join(APP_DIR).join("sessions");

    if !session_dir.exists() {
        fs::create_dir_all(&session_dir)?;
    }

    Ok(session_dir)
}

/// Where downloaded assistant files land.
pub fn ensure_downloads_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    let downloads_dir = home_dir.join(".config").join(APP_DIR).join("downloads");

    if !downloads_dir.exists() {
        fs::create_dir_all(&downloads_dir)?;
    }

    Ok(downloads_dir)
}

pub fn persist_messages(session_file: &Path, messages: &[Message]) -> Result<()> {
    let file = fs::File::create(session_file)?; // Create or truncate the file
    persist_messages_internal(file, messages)
}

fn persist_messages_internal(session_file: File, messages: &[Message]) -> Result<()> {
    let mut writer = std::io::BufWriter::new(session_file);

    for message in messages {
        serde_json::to_writer(&mut writer, &message)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn load_messages(session_file: &Path) -> Result<Vec<Message>> {
    let contents = fs::read_to_string(session_file)?;
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Ok(serde_json::from_str(line)?))
        .collect()
}

/// Write one downloaded attachment and return where it landed.
pub fn save_attachment(downloads_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = downloads_dir.join(file_name);
    fs::write(&path, bytes)?;
    Ok(path)
}
