use terminal_size::{terminal_size, Width};

/// For clap's help formatting; 80 if there is no terminal (e.g. when
/// piped).
pub fn get_terminal_width() -> usize {
    if let Some((Width(width), _height)) = terminal_size() {
        width.into()
    } else {
        80
    }
}
