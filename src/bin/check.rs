use wl_rs::allowlist::check::verify_origin;
use wl_rs::config::BridgeConfig;

fn main() {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().expect("usage: check <config.yaml> <application> <origin>");
    let application = args.next().expect("missing application");
    let origin = args.next().expect("missing origin");

    let config = BridgeConfig::from_file(&config_path).unwrap();
    let allow_list = config.allow_list_for(&application).unwrap();

    if allow_list.is_empty() || verify_origin(&origin, &allow_list.tokens()) {
        println!("{origin}: allowed");
    } else {
        println!("{origin}: blocked");
    }
}
