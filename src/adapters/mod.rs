// Adapters layer: concrete implementations for external systems (the ArcGIS
// query service and the CSV files on either side of a run).

pub mod arcgis;
pub mod csv_io;
