pub struct DefaultsConfig {
    pub width: f64,
    pub min: f64,
    pub max: f64,
    pub temperature: f64,
    pub strict_out_of_range: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            width: 0.1,
            min: -10.0,
            max: 10.0,
            temperature: 300.0,
            strict_out_of_range: false,
        }
    }
}
