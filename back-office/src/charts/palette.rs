/// Fixed chart palette, assigned cyclically by position
pub const PALETTE: &[&str] = &[
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6",
    "#EC4899", "#06B6D4", "#84CC16", "#F97316", "#6366F1",
];

/// Palette slot for a position
pub fn color_index(position: usize) -> usize {
    position % PALETTE.len()
}

pub fn color_for(position: usize) -> &'static str {
    PALETTE[color_index(position)]
}
