use std::path::PathBuf;

pub struct CompileArgs {
    pub input: PathBuf,
    pub output_dir: Option<PathBuf>,
}

pub struct CheckArgs {
    pub input: PathBuf,
}
