pub mod targets {
    pub const BUILD: &str = "build";
    pub const SEARCH: &str = "search";
    pub const RULES: &str = "rules";
    pub const BLOCKING: &str = "blocking";
    pub const CLASH: &str = "clash";
}
