/// Where the controller renders its output.
///
/// Every method replaces what was previously shown for that element.
pub trait Surface {
    /// Redraw the whole playlist.
    fn show_playlist(&mut self, names: Vec<String>);
    /// Highlight the current entry, or none.
    fn show_current(&mut self, index: Option<usize>);
    fn show_title(&mut self, title: &str);
    /// Update the seek bar position (0-100) and the elapsed/total text.
    fn show_time(&mut self, progress_percent: f64, text: &str);
    /// `true` shows the pause control, `false` the play control.
    fn show_transport(&mut self, playing: bool);
    fn show_shuffle(&mut self, label: &str);
    fn show_rate(&mut self, rate: f64);
}
