use std::path::Path;

use anyhow::{Context, Result};
use crashload::source::ROAD_CRASH_FILES;

/// Small stand-ins for the road crash extracts, enough to exercise a load.
fn sample(file: &str) -> &'static str {
    match file {
        "ACCIDENT.csv" => {
            "ACCIDENT_NO,ACCIDENT_DATE,ACCIDENT_TIME,ACCIDENT_TYPE_DESC,DAY_WEEK_DESC,NO_PERSONS,NO_PERSONS_INJ_2,NO_PERSONS_INJ_3,NO_PERSONS_KILLED,NO_PERSONS_NOT_INJ\n\
             T20120000013,2012-01-01,02:25:00,Collision with vehicle,Sunday,2,0,1,0,1\n\
             T20120000018,2012-01-01,03:30:00,Struck Pedestrian,Sunday,3,1,0,0,2\n\
             T20130000231,2013-03-12,17:05:00,Collision with a fixed object,Tuesday,1,0,0,1,0\n"
        }
        "ACCIDENT_EVENT.csv" => {
            "ACCIDENT_NO,EVENT_SEQ_NO,EVENT_TYPE_DESC,VEHICLE_1_ID,VEHICLE_2_ID\n\
             T20120000013,1,Collision,A,B\n\
             T20120000018,1,Struck Pedestrian,A,\n\
             T20130000231,1,Struck Object,A,\n"
        }
        "ACCIDENT_LOCATION.csv" => {
            "ACCIDENT_NO,NODE_ID,ROAD_NAME,ROAD_TYPE,DISTANCE_LOCATION\n\
             T20120000013,43078,NEPEAN,HIGHWAY,10\n\
             T20120000018,43081,BRIDGE,ROAD,0\n\
             T20130000231,51200,\"MAIN, OLD\",ROAD,25.5\n"
        }
        "ATMOSPHERIC_COND.csv" => {
            "ACCIDENT_NO,ATMOSPH_COND,ATMOSPH_COND_SEQ,ATMOSPH_COND_DESC\n\
             T20120000013,1,1,Clear\n\
             T20120000018,1,1,Clear\n\
             T20130000231,2,1,Raining\n"
        }
        "NODE.csv" => {
            "ACCIDENT_NO,NODE_ID,LGA_NAME,LATITUDE,LONGITUDE\n\
             T20120000013,43078,BAYSIDE,-37.9531,145.0156\n\
             T20120000018,43081,RICHMOND,-37.8236,144.9988\n\
             T20130000231,51200,CASEY,-38.0912,145.2770\n"
        }
        "PERSON.csv" => {
            "ACCIDENT_NO,PERSON_ID,VEHICLE_ID,SEX,AGE_GROUP,INJ_LEVEL_DESC,ROAD_USER_TYPE_DESC,HELMET_BELT_WORN\n\
             T20120000013,01,A,M,30-39,Not injured,Drivers,True\n\
             T20120000013,02,B,F,22-25,Serious injury,Drivers,True\n\
             T20120000018,01,A,U,Unknown,Not injured,Drivers,False\n\
             T20130000231,01,A,M,17-21,Fatality,Drivers,NA\n"
        }
        "ROAD_SURFACE_COND.csv" => {
            "ACCIDENT_NO,SURFACE_COND,SURFACE_COND_DESC,SURFACE_COND_SEQ\n\
             T20120000013,1,Dry,1\n\
             T20120000018,1,Dry,1\n\
             T20130000231,2,Wet,1\n"
        }
        "SUB_DCA.csv" => {
            "ACCIDENT_NO,SUB_DCA_CODE,SUB_DCA_SEQ,SUB_DCA_CODE_DESC\n\
             T20120000013,F13,1,Head on (not overtaking)\n\
             T20130000231,H01,1,Off carriageway on straight\n"
        }
        "VEHICLE.csv" => {
            "ACCIDENT_NO,VEHICLE_ID,VEHICLE_YEAR_MANUF,VEHICLE_BODY_STYLE,VEHICLE_TYPE_DESC\n\
             T20120000013,A,2008,SEDAN,Car\n\
             T20120000013,B,,WAGON,Station Wagon\n\
             T20120000018,A,1999,UTIL,Utility\n\
             T20130000231,A,2011,SEDAN,Car\n"
        }
        _ => "ID\n1\n",
    }
}

fn main() -> Result<()> {
    let dir = Path::new("dev/data");
    std::fs::create_dir_all(dir)?;
    for file in ROAD_CRASH_FILES {
        let path = dir.join(file);
        std::fs::write(&path, sample(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    println!("Seeded {} CSV files in {}", ROAD_CRASH_FILES.len(), dir.display());
    Ok(())
}
