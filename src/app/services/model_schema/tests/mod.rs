//! Test utilities and fixtures for model schema testing

use std::io::Write;
use tempfile::NamedTempFile;


/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// Small schema with model and structure properties in two categories
pub fn create_schema_content() -> String {
    r#"key,type,caption,default,min,max,category,subcategory,structuretype,description,unit
RefDate,dateonly,Reference date,20010101,,,time,,,Reference date,
DtUser,interval,User time step,300,0,,time,,,User time step,s
capacity,steerable,Capacity,1.0,0,,Pump,,pump,Pump capacity,m3/s
useVelocityHeight,true|false,Use velocity height,true,,,Weir,,weir,,
state,0|1,Breach growth active,1,,,Levee breach,,dambreak,,
algorithm,2|3,Growth formula:Verheij-vdKnaap (2002)|User defined breach,2,,,Levee breach,,dambreak,,
,string,Row without key,,,,time,,,,
gateOpeningHorizontalDirection,symmetric|fromLeft|fromRight,Horizontal opening direction:Symmetric|From left|From right,symmetric,,,Gate,,gate,,
Tstart,double,Start time,0,,,time,,,,min
"#
    .to_string()
}
