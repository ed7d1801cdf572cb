use crate::codebook::Codebook;
use crate::config::CipherConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::stats::CorpusStats;
use crate::store::read;

const RAREST_SHOWN: usize = 10;

/// Describe the configured corpus and its cached indices.
///
/// Statistics come from the reverse index cache when it exists; otherwise the
/// corpus is segmented in memory without writing anything.
pub fn show_info(config: &CipherConfig) -> Result<String> {
    let grid: Grid = if config.reverse_path.exists() {
        read(&config.reverse_path)?
    } else {
        config.store().build_grid()?
    };
    let codebook = Codebook::build(&grid);
    let stats = CorpusStats::collect(&grid, &codebook, RAREST_SHOWN);

    let mut output = String::new();
    output.push_str("Book Cipher Information\n");
    output.push_str("=======================\n\n");

    output.push_str("Corpus:\n");
    for path in &config.corpus {
        output.push_str(&format!("  {}\n", path.display()));
    }
    output.push('\n');

    output.push_str("Layout:\n");
    output.push_str(&format!("  Line width: {}\n", config.layout.line_width));
    output.push_str(&format!("  Lines per page: {}\n", config.layout.page_lines));
    output.push_str(&format!("  Flush: {:?}\n", config.layout.flush));
    output.push('\n');

    output.push_str("Cache:\n");
    output.push_str(&format!(
        "  Codebook: {} ({})\n",
        config.codebook_path.display(),
        cache_state(config.codebook_path.exists())
    ));
    output.push_str(&format!(
        "  Reverse index: {} ({})\n",
        config.reverse_path.display(),
        cache_state(config.reverse_path.exists())
    ));
    output.push('\n');

    output.push_str(&stats.to_string());
    Ok(output)
}

fn cache_state(exists: bool) -> &'static str {
    if exists {
        "cached"
    } else {
        "not built"
    }
}
