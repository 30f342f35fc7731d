use topomap::job::preset_names;
use topomap::{run, GeoPoint, MapJob, RemoteDataset, Script};

fn plan(name: &str) -> Vec<Script> {
    let job = MapJob::preset(name).unwrap();
    run(&job, &RemoteDataset::default(), |i| Script::new(&format!("{}-{}", name, i + 1))).unwrap()
}

#[test]
fn sonthofen_script() {
    let figs = plan("sonthofen");
    assert_eq!(figs.len(), 1);
    assert_eq!(figs[0].render(),
               "gmt begin sonthofen-1\n\
                gmt grdcontour @earth_relief_01s -R10.146624/10.413376/47.419910/47.600090 -C50 \
                -JM10c\n\
                gmt end show\n");
}

#[test]
fn nuernberg_scripts() {
    let figs = plan("nuernberg");
    assert_eq!(figs.len(), 4);
    assert!(figs.iter().all(|f| f.is_shown()));

    let region = "-R10.723559/11.416441/49.224775/49.675225";
    let first = figs[0].lines();
    assert_eq!(first[1],
               format!("gmt grdcontour @earth_relief_01s {} -C20 -A250 -JM10c", region));
    assert_eq!(first[2],
               "echo '11.07 49.45 Nürnberg' | gmt text -F+f8p,Helvetica-Bold,black+jCM");

    assert!(figs[2].lines()[1].ends_with("-C20 -A250 -JM10c -Baf"));

    let last = figs[3].lines();
    assert!(last[1].starts_with("gmt grdimage @earth_relief_01s"));
    assert!(last[1].ends_with("-Chaxby -JM10c -Baf"));
    assert!(last[2].ends_with("-C250 -A1000 -L-4000/-2000"));
}

#[test]
fn every_region_contains_its_center() {
    for name in preset_names() {
        let job = MapJob::preset(name).unwrap();
        let region = job.region().unwrap();
        assert!(region.contains(job.center));
        let (lat, lon) = region.center();
        assert!((lat - job.center.latitude()).abs() < 1e-9);
        assert!((lon - job.center.longitude()).abs() < 1e-9);
    }
}

#[test]
fn southern_hemisphere_job() {
    let json = r#"{
        "name": "table-mountain",
        "center": {"latitude": -33.9628, "longitude": 18.4098},
        "radius_km": 3,
        "resolution": "03s",
        "model": "ellipsoidal",
        "figures": [{"layers": [{"type": "contour", "interval": 25, "projection": "M12c"}]}]
    }"#;
    let job = MapJob::from_json(json.as_bytes()).unwrap();
    let figs = run(&job, &RemoteDataset::default(), |_| Script::new("tm")).unwrap();
    let line = &figs[0].lines()[1];
    assert!(line.starts_with("gmt grdcontour @earth_relief_03s -R18.37"));
    assert!(line.ends_with("-C25 -JM12c"));
    assert!(GeoPoint::new(-33.9628, 18.4098).map(|p| job.region().unwrap().contains(p)).unwrap());
}

#[test]
fn enormous_radius_plans_without_overflow() {
    let json = r#"{
        "name": "everything",
        "center": {"latitude": 10, "longitude": 10},
        "radius_km": 1e300,
        "figures": [{"layers": [{"type": "contour", "interval": 50}]}]
    }"#;
    let job = MapJob::from_json(json.as_bytes()).unwrap();
    let figs = run(&job, &RemoteDataset::default(), |_| Script::new("everything")).unwrap();
    assert_eq!(figs.len(), 1);
    assert!(figs[0].is_shown());
}

#[test]
fn job_strings_stay_single_shell_words() {
    let json = r#"{
        "name": "my map",
        "center": {"latitude": 47.51, "longitude": 10.28},
        "radius_km": 10,
        "figures": [{"layers": [
            {"type": "contour", "interval": 50, "projection": "M10c; touch /tmp/x"}
        ]}]
    }"#;
    let job = MapJob::from_json(json.as_bytes()).unwrap();
    let figs = run(&job, &RemoteDataset::default(), |_| Script::new(&job.name)).unwrap();
    let lines = figs[0].lines();
    assert_eq!(lines[0], "gmt begin 'my map'");
    assert!(lines[1].ends_with("-C50 -J'M10c; touch /tmp/x'"), "{}", lines[1]);
}
