/// Short chromosome names remapped on read (yeast style numerals and the
/// common single letter names).
pub const STANDARD_CHROMS: [(&str, &str); 7] = [
    ("I", "chrI"),
    ("II", "chrII"),
    ("III", "chrIII"),
    ("IV", "chrIV"),
    ("V", "chrV"),
    ("M", "chrM"),
    ("X", "chrX"),
];

///
/// Map a chromosome name through the alias table, returning it unchanged
/// when it has no alias.
///
pub fn standard_chrom(chrom: &str) -> &str {
    STANDARD_CHROMS
        .iter()
        .find(|(alias, _)| *alias == chrom)
        .map(|(_, name)| *name)
        .unwrap_or(chrom)
}
