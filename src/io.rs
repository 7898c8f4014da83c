use std::path::Path;

use log::debug;
use tokio::{
    fs::{create_dir_all, read_to_string, File},
    io::AsyncWriteExt,
};

use crate::{config::RingConfig, error::Result, ring::DigitRing};

async fn create_parent_dirs_for(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }
    Ok(())
}

pub async fn create_file<P>(name: P) -> Result<File>
where
    P: AsRef<Path>,
{
    create_parent_dirs_for(name.as_ref()).await?;
    let file = File::create(name).await?;
    Ok(file)
}

pub async fn save_file<P, B>(name: P, bytes: B) -> Result<()>
where
    P: AsRef<Path>,
    B: AsRef<[u8]>,
{
    let mut file = create_file(name).await?;
    file.write_all(bytes.as_ref()).await?;
    file.flush().await?;
    Ok(())
}

/// Every line trimmed, then concatenated.
pub async fn load_seed<P>(name: P) -> Result<String>
where
    P: AsRef<Path>,
{
    let text = read_to_string(name.as_ref()).await?;
    let seed: String = text.lines().map(str::trim).collect();
    debug!("Read {} seed characters from {:?}.", seed.len(), name.as_ref());
    Ok(seed)
}

pub async fn load_ring<P>(name: P, base: u8) -> Result<DigitRing>
where
    P: AsRef<Path>,
{
    DigitRing::from_decimal_with_base(&load_seed(name).await?, base)
}

/// The file holds only the decimal value, no trailing newline.
pub async fn save_decimal<P>(name: P, ring: &DigitRing) -> Result<()>
where
    P: AsRef<Path>,
{
    let decimal = ring.to_decimal_string();
    debug!("Saving {decimal} to {:?}.", name.as_ref());
    save_file(name, decimal).await
}

pub async fn load_config<P>(name: P) -> Result<RingConfig>
where
    P: AsRef<Path>,
{
    RingConfig::from_toml(&read_to_string(name).await?)
}
