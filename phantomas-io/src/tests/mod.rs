//! Tests spanning loading, building and exporting a whole phantom
