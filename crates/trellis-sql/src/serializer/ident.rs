use super::{Formatter, Params, ToSql};

pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let quoted = f.serializer.flavor.quote(self.0.as_ref());
        f.dst.push_str(&quoted);
    }
}
