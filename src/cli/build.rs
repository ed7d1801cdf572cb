use crate::config::CipherConfig;
use crate::error::Result;

/// Options for the build command
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Rebuild even when the cache files already exist
    pub force: bool,
}

/// Make sure both cache files exist, building them from the corpus as needed.
/// Returns a short report.
pub fn build_codebooks(config: &CipherConfig, options: &BuildOptions) -> Result<String> {
    let store = config.store();
    let (codebook, grid) = if options.force {
        store.rebuild(&config.codebook_path, &config.reverse_path)?
    } else {
        (
            store.load_codebook(&config.codebook_path)?,
            store.load_reverse_index(&config.reverse_path)?,
        )
    };

    let mut output = String::new();
    output.push_str(&format!(
        "Codebook: {} ({} characters)\n",
        config.codebook_path.display(),
        codebook.symbol_count()
    ));
    output.push_str(&format!(
        "Reverse index: {} ({} pages, {} lines)\n",
        config.reverse_path.display(),
        grid.page_count(),
        grid.line_count()
    ));
    Ok(output)
}
