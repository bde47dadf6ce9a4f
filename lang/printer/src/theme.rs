use std::borrow::Cow;

use pretty::{
    DocAllocator,
    termcolor::{Color, ColorSpec},
};

use super::types::*;

const KEYWORD: Color = Color::Magenta;
const CTOR: Color = Color::Blue;
const TYPE: Color = Color::Red;
const HOLE: Color = Color::Yellow;
const COMMENT: Color = Color::Cyan;

pub trait ThemeExt<'a> {
    fn keyword<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a>;
    fn ctor<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a>;
    fn typ<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a>;
    fn hole<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a>;
    fn comment<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a>;
    fn error<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a>;
}

impl<'a> ThemeExt<'a> for Alloc<'a> {
    fn keyword<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a> {
        self.text(text).annotate(KEYWORD.spec())
    }

    fn ctor<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a> {
        self.text(text).annotate(CTOR.spec())
    }

    fn typ<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a> {
        self.text(text).annotate(TYPE.spec())
    }

    fn hole<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a> {
        self.text(text).annotate(HOLE.spec())
    }

    fn comment<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a> {
        self.text(text).annotate(COMMENT.spec())
    }

    fn error<S: Into<Cow<'a, str>>>(&'a self, text: S) -> Builder<'a> {
        self.text(text).annotate(TYPE.spec().set_bold(true).clone())
    }
}

pub trait ColorExt {
    fn spec(self) -> ColorSpec;
}

impl ColorExt for Color {
    fn spec(self) -> ColorSpec {
        ColorSpec::new().set_fg(Some(self)).clone()
    }
}
