mod options;
pub use self::options::{ExportFields, ExportFormat, Interval, TimeSeriesFormat};
