use log::debug;
use url::Url;

use super::channel::FileSink;
use super::path::FileUrl;

/// Funnels every native open-file shape into one [`FileSink`].
///
/// Input order is kept; entries that are not local files are dropped.
pub struct OsEventNormalizer<'a, K: ?Sized> {
    sink: &'a K,
}

impl<'a, K: FileSink + ?Sized> OsEventNormalizer<'a, K> {
    pub fn new(sink: &'a K) -> Self {
        Self { sink }
    }

    /// Forwards each raw path or URL that names a local file. Returns how many
    /// were forwarded.
    pub fn submit<I, S>(&self, raw: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.forward(raw, FileUrl::parse)
    }

    pub fn open_file(&self, path: &str) -> usize {
        self.forward([path], |path: &str| FileUrl::from_path(path))
    }

    // OS paths skip URL sniffing: `notes:2024.md` is a file name here.
    pub fn open_files<S: AsRef<str>>(&self, paths: &[S]) -> usize {
        self.forward(paths, |path: &str| FileUrl::from_path(path))
    }

    pub fn open_urls(&self, urls: &[Url]) -> usize {
        self.forward(urls.iter().map(Url::as_str), FileUrl::parse)
    }

    fn forward<I, S>(&self, raw: I, to_file: impl Fn(&str) -> Option<FileUrl>) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut forwarded = 0;
        for entry in raw {
            let entry = entry.as_ref();
            match to_file(entry) {
                Some(file) => {
                    debug!("Observed file: {}", file);
                    self.sink.observe_file(file);
                    forwarded += 1;
                }
                None => debug!("Dropping non-file entry: {:?}", entry),
            }
        }
        forwarded
    }
}

/// Positional arguments after the program name; flags are skipped. File
/// associations on Windows and Linux hand files over this way.
pub fn launch_arguments<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .skip(1)
        .filter(|arg| !arg.starts_with('-'))
        .collect()
}
