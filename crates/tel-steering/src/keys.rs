//! Steering keys this layer reads or writes by name.

pub const TITLE: &str = "TITLE";
pub const GEOMETRY_FILE: &str = "GEOMETRY FILE";
pub const BOUNDARY_CONDITIONS_FILE: &str = "BOUNDARY CONDITIONS FILE";
pub const RESULTS_FILE: &str = "RESULTS FILE";
pub const FORTRAN_FILE: &str = "FORTRAN FILE";
pub const NAMES_OF_PRIVATE_VARIABLES: &str = "NAMES OF PRIVATE VARIABLES";
pub const DURATION: &str = "DURATION";
pub const TIME_STEP: &str = "TIME STEP";
pub const INITIAL_CONDITIONS: &str = "INITIAL CONDITIONS";
pub const VARIABLES_FOR_GRAPHIC_PRINTOUTS: &str = "VARIABLES FOR GRAPHIC PRINTOUTS";
pub const GRAPHIC_PRINTOUT_PERIOD: &str = "GRAPHIC PRINTOUT PERIOD";
pub const LISTING_PRINTOUT_PERIOD: &str = "LISTING PRINTOUT PERIOD";
