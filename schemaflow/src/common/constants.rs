// dependency constants
pub const FIRST_MIGRATION: &str = "__first__";
pub const DEPENDENCY_SEPARATOR: char = '.';

// sql collection constants
pub const SQL_COMMENT_SEPARATOR: &str = "--";
pub const NON_SQL_OPERATION_NOTICE: &str =
    "-- MIGRATION NOW PERFORMS OPERATION THAT CANNOT BE WRITTEN AS SQL:";
