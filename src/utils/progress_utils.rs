use indicatif::{ProgressBar, ProgressStyle};

/// A styled bar, or `None` when the template fails to parse.
pub fn progress_bar(len: u64, msg: &str) -> Option<ProgressBar> {
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
        .ok()?
        .progress_chars("##-");

    let bar = ProgressBar::new(len).with_style(style);
    bar.set_message(msg.to_string());
    Some(bar)
}
