#[derive(Debug)]
pub struct Constant {
    pub name: &'static str,
    pub value: f64,
}

static CONSTANTS: [Constant; 3] = [
    Constant { name: "PI", value: std::f64::consts::PI },
    Constant { name: "E", value: std::f64::consts::E },
    // standard gravity at the equator, m/s^2
    Constant { name: "G", value: 9.78033 },
];

pub fn constants() -> &'static [Constant] {
    &CONSTANTS
}

pub fn lookup_constant(name: &str) -> Option<&'static Constant> {
    CONSTANTS.iter().find(|c| c.name == name)
}
