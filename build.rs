// crates.io
use vergen::EmitBuilder;

fn main() {
	let mut emitter = EmitBuilder::builder();

	emitter.all_build().all_cargo().all_git();

	if let Err(e) = emitter.emit() {
		println!("cargo:warning=failed to emit build metadata: {e}");
	}
}
